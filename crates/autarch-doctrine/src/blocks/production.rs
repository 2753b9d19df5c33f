//! Unit production: one rule per unit role, each gated by a weight-scaled
//! cap and the savings-aware cash gate so cheap spam can't starve an
//! in-progress tech center or superweapon.

use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::{lerp_cap, lerp_priority, rule};
use crate::cond::Saving;
use crate::{cond, priority, roles};

const UNIT_CAP_MIN: u32 = 2;
const UNIT_CAP_MAX: u32 = 20;

/// Reserves shared by every production rule: once a tech path's
/// prerequisite building exists, cheap units stop competing with the
/// tech center and superweapon buildings for cash. Each reserve is
/// suppressed until its own prerequisite is up — radar for the tech
/// center, tech center for the missile silo — so the saving never
/// demands cash for a building that isn't buildable yet.
fn shared_savings(doctrine: &Doctrine) -> Vec<Saving> {
    let mut savings = Vec::new();
    if doctrine.tech > 0.0 {
        savings.push(Saving {
            exists: cond::or(cond::not(cond::has_role(roles::RADAR)), cond::has_role(roles::TECH_CENTER)),
            reserve: 1500.0,
        });
    }
    if doctrine.superweapon > 0.0 {
        savings.push(Saving {
            exists: cond::or(
                cond::not(cond::has_role(roles::TECH_CENTER)),
                cond::has_role(roles::MISSILE_SILO),
            ),
            reserve: 2500.0,
        });
    }
    savings
}

struct Entry {
    name: &'static str,
    role: &'static str,
    governing_weight: f32,
    unit_cost: f64,
    extra_condition: Option<autarch_rules::CompiledCondition>,
}

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let savings = shared_savings(doctrine);

    let entries = [
        Entry {
            name: "production_infantry",
            role: roles::INFANTRY,
            governing_weight: doctrine.infantry,
            unit_cost: 100.0,
            extra_condition: None,
        },
        Entry {
            name: "production_specialist_infantry",
            role: roles::SPECIALIST_INFANTRY,
            governing_weight: doctrine.specialist_infantry,
            unit_cost: 150.0,
            extra_condition: None,
        },
        Entry {
            name: "production_vehicle",
            role: roles::VEHICLE,
            governing_weight: doctrine.vehicle,
            unit_cost: 600.0,
            extra_condition: None,
        },
        Entry {
            name: "production_aircraft",
            role: roles::AIRCRAFT,
            governing_weight: doctrine.air,
            unit_cost: 900.0,
            extra_condition: None,
        },
        Entry {
            name: "production_ship",
            role: roles::SHIP,
            governing_weight: doctrine.naval,
            unit_cost: 800.0,
            extra_condition: Some(cond::map_has_water()),
        },
        Entry {
            name: "production_gunboat",
            role: roles::GUNBOAT,
            governing_weight: doctrine.naval,
            unit_cost: 500.0,
            extra_condition: Some(cond::map_has_water()),
        },
        Entry {
            name: "production_scout_vehicle",
            role: roles::SCOUT_VEHICLE,
            governing_weight: doctrine.scout,
            unit_cost: 300.0,
            extra_condition: Some(cond::not(cond::has_enemy_intel())),
        },
        Entry {
            name: "production_siege_vehicle",
            role: roles::SIEGE_VEHICLE,
            governing_weight: doctrine.vehicle,
            unit_cost: 1200.0,
            extra_condition: None,
        },
        Entry {
            name: "production_flak_truck",
            role: roles::FLAK_TRUCK,
            governing_weight: doctrine.air_defense.min(doctrine.vehicle),
            unit_cost: 450.0,
            extra_condition: None,
        },
        Entry {
            name: "production_advanced_aircraft",
            role: roles::ADVANCED_AIRCRAFT,
            governing_weight: doctrine.air,
            unit_cost: 1600.0,
            extra_condition: Some(cond::has_role(roles::TECH_CENTER)),
        },
        Entry {
            name: "production_rocket_soldier",
            role: roles::ROCKET_SOLDIER,
            governing_weight: doctrine.infantry,
            unit_cost: 300.0,
            extra_condition: None,
        },
        Entry {
            name: "production_heavy_vehicle",
            role: roles::HEAVY_VEHICLE,
            governing_weight: doctrine.vehicle,
            unit_cost: 1800.0,
            extra_condition: Some(cond::has_role(roles::TECH_CENTER)),
        },
        Entry {
            name: "production_advanced_ship",
            role: roles::ADVANCED_SHIP,
            governing_weight: doctrine.naval,
            unit_cost: 1600.0,
            extra_condition: Some(cond::and(cond::map_has_water(), cond::has_role(roles::TECH_CENTER))),
        },
    ];

    let mut out = Vec::new();
    for entry in entries {
        if entry.governing_weight <= 0.0 {
            continue;
        }
        let cap = lerp_cap(entry.governing_weight, UNIT_CAP_MIN, UNIT_CAP_MAX);
        let gate = cond::and(
            cond::power_excess_at_least(0.0),
            cond::and(
                cond::role_count_below(entry.role, cap),
                cond::and(cond::can_build_role(entry.role), cond::cash_gate(entry.unit_cost, clone_savings(&savings))),
            ),
        );
        let condition = match entry.extra_condition {
            Some(extra) => cond::and(gate, extra),
            None => gate,
        };
        let prio = lerp_priority(entry.governing_weight, priority::PRODUCTION_MIN, priority::PRODUCTION_MAX);
        out.push(rule(
            entry.name,
            prio,
            Category::Production,
            true,
            format!("PowerExcess() >= 0 AND RoleCount({}) < cap AND CashGate({})", entry.role, entry.unit_cost),
            condition,
            autarch_actions::produce_role(entry.role, 1),
        ));
    }
    out
}

/// `Saving` holds `CompiledCondition`s, which are `Arc`s and so cheap to
/// clone; each production rule needs its own owned copy of the shared list.
fn clone_savings(savings: &[Saving]) -> Vec<Saving> {
    savings
        .iter()
        .map(|s| Saving {
            exists: s.exists.clone(),
            reserve: s.reserve,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::EngineMemory;
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, OwnedBuilding, ProductionQueue, Snapshot};
    use autarch_core::types::Position;
    use autarch_env::Environment;

    fn registry() -> RoleRegistry {
        let mut registry = RoleRegistry::new();
        registry.insert(roles::RADAR, "Building", vec!["radr".to_string()]);
        registry.insert(roles::TECH_CENTER, "Building", vec!["stek".to_string()]);
        registry.insert(roles::MISSILE_SILO, "Building", vec!["msil".to_string()]);
        registry
    }

    fn snapshot_with_buildings(cash: f64, type_codes: &[&str]) -> Snapshot {
        Snapshot {
            tick: 1,
            economy: Economy {
                cash,
                ..Economy::default()
            },
            units: vec![],
            buildings: type_codes
                .iter()
                .enumerate()
                .map(|(i, code)| OwnedBuilding {
                    id: i as u32,
                    type_code: code.to_string(),
                    position: Position::new(0.0, 0.0),
                    hp: 1000.0,
                    max_hp: 1000.0,
                })
                .collect(),
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

    fn tech_saving_holds(cash: f64, type_codes: &[&str]) -> bool {
        let doctrine = Doctrine {
            tech: 0.5,
            ..Doctrine::default()
        };
        let savings = shared_savings(&doctrine);
        let snapshot = snapshot_with_buildings(cash, type_codes);
        let memory = EngineMemory::new();
        let roles = registry();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        (savings[0].exists)(&env)
    }

    #[test]
    fn tech_reserve_suppressed_before_radar_exists() {
        // No radar yet: tech center isn't buildable, so the reserve must not
        // compete with cheap production for cash.
        assert!(tech_saving_holds(0.0, &[]));
    }

    #[test]
    fn tech_reserve_active_once_radar_exists_without_tech_center() {
        assert!(!tech_saving_holds(0.0, &["radr"]));
    }

    #[test]
    fn tech_reserve_suppressed_once_tech_center_exists() {
        assert!(tech_saving_holds(0.0, &["radr", "stek"]));
    }

    #[test]
    fn superweapon_reserve_suppressed_before_tech_center_exists() {
        let doctrine = Doctrine {
            superweapon: 0.5,
            ..Doctrine::default()
        };
        let savings = shared_savings(&doctrine);
        let snapshot = snapshot_with_buildings(0.0, &[]);
        let memory = EngineMemory::new();
        let roles = registry();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert!((savings[0].exists)(&env));
    }

    #[test]
    fn superweapon_reserve_active_once_tech_center_exists_without_silo() {
        let doctrine = Doctrine {
            superweapon: 0.5,
            ..Doctrine::default()
        };
        let savings = shared_savings(&doctrine);
        let snapshot = snapshot_with_buildings(0.0, &["stek"]);
        let memory = EngineMemory::new();
        let roles = registry();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert!(!(savings[0].exists)(&env));
    }
}
