//! Condition/action closures and the mutable context actions run against.
//!
//! Conditions are synthesized by the doctrine compiler as first-class
//! closures over [`Environment`] rather than as an embedded expression
//! language: a condition is just "a predicate the compiler happened to
//! build," and the only thing ever built from raw LLM/user text is the
//! doctrine's numeric weights, never a condition string.

use std::sync::Arc;

use autarch_core::memory::EngineMemory;
use autarch_core::role::RoleRegistry;
use autarch_core::snapshot::Snapshot;
use autarch_core::wire::OutboundCommand;
use autarch_env::Environment;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// A compiled condition: a boolean predicate over the evaluation environment.
pub type CompiledCondition = Arc<dyn Fn(&Environment) -> bool + Send + Sync>;

/// A compiled action: emits zero or more outbound commands, with mutable
/// access to engine memory and the per-connection RNG for heuristics that
/// need one (placement jitter, hunt-ring stepping).
pub type CompiledAction = Arc<dyn Fn(&mut ActionContext) -> Result<Vec<OutboundCommand>, ActionError> + Send + Sync>;

/// Everything an action needs beyond what `Environment` exposes read-only.
pub struct ActionContext<'a> {
    pub snapshot: &'a Snapshot,
    pub roles: &'a RoleRegistry,
    pub faction: &'a str,
    pub memory: &'a mut EngineMemory,
    pub rng: &'a mut ChaCha8Rng,
    pub tick: u64,
}

impl<'a> ActionContext<'a> {
    /// A read-only environment over this context's current data, for
    /// actions that need to re-query state (e.g. to pick a target) before
    /// mutating memory.
    pub fn environment(&self) -> Environment<'_> {
        Environment::new(self.snapshot, self.memory, self.roles, self.faction)
    }
}

/// Error an action may raise; always caught and logged by the engine, never
/// propagated to abort a tick.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action precondition no longer holds: {0}")]
    PreconditionFailed(String),
    #[error("action could not find a target: {0}")]
    NoTarget(String),
}
