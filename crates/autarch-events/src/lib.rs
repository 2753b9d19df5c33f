//! Event detector: diffs consecutive game-state snapshots into typed
//! events that trigger early strategist re-evaluation (spec.md §4.4).

pub mod detector;
pub mod phase;
pub mod types;

pub use detector::{CompactSnapshot, CounterDomain, EventDetector};
pub use phase::GamePhase;
pub use types::GameEvent;
