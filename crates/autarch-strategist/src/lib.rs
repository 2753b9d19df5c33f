//! The strategist loop: a background scheduler that periodically (or on
//! an urgent event) asks an LLM adapter for a new doctrine and hot-swaps
//! the rule engine's compiled rule set.

pub mod adapter;
pub mod error;
pub mod scheduler;
pub mod summary;

pub use adapter::{LlmAdapter, NullAdapter, RawDoctrine};
pub use error::LlmError;
pub use scheduler::{Strategist, StrategistConfig};
pub use summary::{summarize, StrategySummary};

#[cfg(test)]
pub use adapter::DeterministicAdapter;
