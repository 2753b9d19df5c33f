//! Condition compilation, rule evaluation, and atomic rule-set hot-swap.
//!
//! The doctrine compiler (`autarch-doctrine`) is the only producer of
//! [`Rule`] values in normal operation; this crate just defines the
//! vocabulary and runs the tick loop over whatever rule set it's handed.

pub mod engine;
pub mod error;
pub mod rule;
pub mod ruleset;
pub mod types;

pub use engine::RuleEngine;
pub use error::CompileError;
pub use rule::Rule;
pub use ruleset::RuleSet;
pub use types::{ActionContext, ActionError, CompiledAction, CompiledCondition};
