//! Condition combinators: the vocabulary the doctrine compiler builds its
//! rule gates from. Every weight comparison, role lookup, or queue check a
//! block needs is one of these, composed with `and`/`or`/`not` — never a
//! string template, so nothing reaches a condition as raw text.

use std::sync::Arc;

use autarch_env::Environment;
use autarch_rules::CompiledCondition;

pub fn always() -> CompiledCondition {
    Arc::new(|_env: &Environment| true)
}

pub fn and(a: CompiledCondition, b: CompiledCondition) -> CompiledCondition {
    Arc::new(move |env: &Environment| a(env) && b(env))
}

pub fn or(a: CompiledCondition, b: CompiledCondition) -> CompiledCondition {
    Arc::new(move |env: &Environment| a(env) || b(env))
}

pub fn not(a: CompiledCondition) -> CompiledCondition {
    Arc::new(move |env: &Environment| !a(env))
}

/// `and` over any number of conditions; `always()` if `conds` is empty.
pub fn all(conds: Vec<CompiledCondition>) -> CompiledCondition {
    Arc::new(move |env: &Environment| conds.iter().all(|c| c(env)))
}

/// `or` over any number of conditions; always false if `conds` is empty.
pub fn any(conds: Vec<CompiledCondition>) -> CompiledCondition {
    Arc::new(move |env: &Environment| conds.iter().any(|c| c(env)))
}

pub fn cash_at_least(amount: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.cash() >= amount)
}

pub fn power_excess_below(amount: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.power_excess() < amount)
}

pub fn power_excess_at_least(amount: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.power_excess() >= amount)
}

pub fn resources_near_cap() -> CompiledCondition {
    Arc::new(|env: &Environment| env.resources_near_cap())
}

pub fn has_role(role: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.has_role(role))
}

pub fn can_build_role(role: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.can_build_role(role))
}

pub fn role_count_below(role: &'static str, cap: u32) -> CompiledCondition {
    Arc::new(move |env: &Environment| (env.role_count(role) as u32) < cap)
}

/// Previously owned but not currently present: triggers a rebuild rule.
pub fn lost_role(role: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.memory.has_ever_built(role) && !env.has_role(role))
}

pub fn queue_ready(queue: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.queue_ready(queue))
}

pub fn queue_busy(queue: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.queue_busy(queue))
}

pub fn map_has_water() -> CompiledCondition {
    Arc::new(|env: &Environment| env.map_has_water())
}

pub fn base_under_attack() -> CompiledCondition {
    Arc::new(|env: &Environment| env.base_under_attack())
}

pub fn has_enemy_intel() -> CompiledCondition {
    Arc::new(|env: &Environment| env.has_enemy_intel())
}

pub fn enemies_visible() -> CompiledCondition {
    Arc::new(|env: &Environment| env.enemies_visible())
}

pub fn has_idle_harvesters() -> CompiledCondition {
    Arc::new(|env: &Environment| !env.idle_harvesters().is_empty())
}

pub fn has_idle_engineers() -> CompiledCondition {
    Arc::new(|env: &Environment| !env.idle_engineers().is_empty())
}

pub fn has_capturables() -> CompiledCondition {
    Arc::new(|env: &Environment| !env.capturables().is_empty())
}

pub fn has_damaged_buildings() -> CompiledCondition {
    Arc::new(|env: &Environment| !env.damaged_buildings().is_empty())
}

pub fn has_damaged_combat_units(threshold: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| !env.damaged_combat_units(threshold).is_empty())
}

pub fn has_unassigned_idle_ground() -> CompiledCondition {
    Arc::new(|env: &Environment| !env.unassigned_idle_ground().is_empty())
}

pub fn squad_exists(name: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.squad_exists(name))
}

pub fn squad_ready_ratio_at_least(name: &'static str, ratio: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.squad_ready_ratio(name) >= ratio)
}

pub fn squad_threat_ratio_at_least(name: &'static str, radius: f64, ratio: f64) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.squad_threat_ratio(name, radius) >= ratio)
}

pub fn squad_needs_reinforcement(name: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.squad_needs_reinforcement(name))
}

pub fn support_power_ready(key: &'static str) -> CompiledCondition {
    Arc::new(move |env: &Environment| env.snapshot.support_powers.iter().any(|p| p.key == key && p.ready))
}

/// A single reserve in the cash-savings gate: `exists` is the condition
/// that marks the saving's prerequisite as already satisfied (in which
/// case the reserve no longer applies), and `reserve` is the extra cash
/// the gate demands on top of the base cost while the prerequisite is
/// still pending.
pub struct Saving {
    pub exists: CompiledCondition,
    pub reserve: f64,
}

/// `Cash() >= cost AND for each saving s: (s.exists OR Cash() >= cost + s.reserve)`.
/// Keeps cheap units from starving a queued expensive building: once any
/// saving's prerequisite is missing, this demands the extra reserve be on
/// hand before spending on the cheaper item at all.
pub fn cash_gate(cost: f64, savings: Vec<Saving>) -> CompiledCondition {
    Arc::new(move |env: &Environment| {
        if env.cash() < cost {
            return false;
        }
        savings.iter().all(|s| (s.exists)(env) || env.cash() >= cost + s.reserve)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::EngineMemory;
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, ProductionQueue, Snapshot};

    fn snapshot_with_cash(cash: f64) -> Snapshot {
        Snapshot {
            tick: 1,
            economy: Economy {
                cash,
                ..Economy::default()
            },
            units: vec![],
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 1000.0,
                height: 1000.0,
            },
            terrain: None,
        }
    }

    #[test]
    fn cash_gate_blocks_below_base_cost() {
        let snapshot = snapshot_with_cash(50.0);
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        let gate = cash_gate(100.0, vec![]);
        assert!(!gate(&env));
    }

    #[test]
    fn cash_gate_demands_reserve_when_saving_prerequisite_missing() {
        let snapshot = snapshot_with_cash(150.0);
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        let gate = cash_gate(
            100.0,
            vec![Saving {
                exists: has_role("radar"),
                reserve: 1000.0,
            }],
        );
        assert!(!gate(&env));
    }

    #[test]
    fn cash_gate_ignores_reserve_once_saving_prerequisite_exists() {
        let snapshot = snapshot_with_cash(150.0);
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        let gate = cash_gate(
            100.0,
            vec![Saving {
                exists: always(),
                reserve: 1000.0,
            }],
        );
        assert!(gate(&env));
    }

    #[test]
    fn all_requires_every_condition() {
        let snapshot = snapshot_with_cash(500.0);
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        let gate = all(vec![cash_at_least(100.0), cash_at_least(1000.0)]);
        assert!(!gate(&env));
    }
}
