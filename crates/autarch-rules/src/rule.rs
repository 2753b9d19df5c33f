use autarch_core::rule::Category;

use crate::types::{CompiledAction, CompiledCondition};

/// A single compiled rule: a gated, prioritized (condition, action) pair.
pub struct Rule {
    pub name: String,
    pub priority: i32,
    pub category: Category,
    /// If true, this rule firing blocks any later rule in the same
    /// category from also firing this tick.
    pub exclusive: bool,
    /// Human-readable description of what the condition checks, for
    /// logging only; never parsed back into behavior.
    pub condition_source: String,
    pub condition: CompiledCondition,
    pub action: CompiledAction,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("category", &self.category)
            .field("exclusive", &self.exclusive)
            .field("condition_source", &self.condition_source)
            .finish_non_exhaustive()
    }
}
