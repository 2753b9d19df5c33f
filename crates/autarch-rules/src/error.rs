use thiserror::Error;

/// Why a candidate rule list failed to compile. Compilation is infallible
/// in practice for doctrine-synthesized rules (the compiler only ever
/// emits well-formed closures), but the type exists so a bad hand-authored
/// rule set — or a future rule source — fails loudly instead of silently.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("duplicate rule name: {0}")]
    DuplicateName(String),
    #[error("empty rule set")]
    Empty,
}
