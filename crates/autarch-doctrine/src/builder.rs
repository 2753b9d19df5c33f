//! Thin constructor for [`Rule`] values, plus the priority-interpolation
//! helper used throughout the blocks.

use autarch_core::rule::Category;
use autarch_rules::{CompiledAction, CompiledCondition, Rule};

#[allow(clippy::too_many_arguments)]
pub fn rule(
    name: impl Into<String>,
    priority: i32,
    category: Category,
    exclusive: bool,
    condition_source: impl Into<String>,
    condition: CompiledCondition,
    action: CompiledAction,
) -> Rule {
    Rule {
        name: name.into(),
        priority,
        category,
        exclusive,
        condition_source: condition_source.into(),
        condition,
        action,
    }
}

/// Linear interpolation of a priority (or any integer-valued quantity)
/// between `min` at weight 0 and `max` at weight 1.
pub fn lerp_priority(weight: f32, min: i32, max: i32) -> i32 {
    min + ((max - min) as f32 * weight.clamp(0.0, 1.0)).round() as i32
}

/// Linear interpolation of a `u32` cap between `min` at weight 0 and `max`
/// at weight 1, always at least 1 once the gating weight is above zero.
pub fn lerp_cap(weight: f32, min: u32, max: u32) -> u32 {
    min + ((max - min) as f32 * weight.clamp(0.0, 1.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_priority_spans_documented_range() {
        assert_eq!(lerp_priority(0.0, 100, 200), 100);
        assert_eq!(lerp_priority(1.0, 100, 200), 200);
        assert_eq!(lerp_priority(0.5, 100, 200), 150);
    }

    #[test]
    fn lerp_cap_is_monotonic_in_weight() {
        let low = lerp_cap(0.2, 1, 10);
        let high = lerp_cap(0.8, 1, 10);
        assert!(high >= low);
    }
}
