//! Military production buildings, gated by the weight that justifies
//! their production path, plus a second copy of each at `Extreme` weight
//! (a maxed-out doctrine wants production running in parallel).

use autarch_core::constants::WEIGHT_EXTREME;
use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::rule;
use crate::{cond, priority, roles};

struct Entry {
    role: &'static str,
    governing_weight: f32,
}

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let entries = [
        Entry {
            role: roles::BARRACKS,
            governing_weight: doctrine.infantry.max(doctrine.specialist_infantry),
        },
        Entry {
            role: roles::WAR_FACTORY,
            governing_weight: doctrine.vehicle,
        },
        Entry {
            role: roles::AIRFIELD,
            governing_weight: doctrine.air,
        },
        Entry {
            role: roles::SERVICE_DEPOT,
            governing_weight: doctrine.vehicle.max(doctrine.air),
        },
        Entry {
            role: roles::NAVAL_YARD,
            governing_weight: doctrine.naval,
        },
    ];

    let mut out = Vec::new();
    for entry in entries {
        if entry.governing_weight <= 0.0 {
            continue;
        }
        let water_gated = entry.role == roles::NAVAL_YARD;
        let base_condition = cond::and(
            cond::role_count_below(entry.role, 1),
            cond::can_build_role(entry.role),
        );
        let condition = if water_gated {
            cond::and(base_condition, cond::map_has_water())
        } else {
            base_condition
        };
        out.push(rule(
            format!("military_building_{}", entry.role),
            priority::MILITARY_BUILDING_MIN,
            Category::MilitaryBuilding,
            true,
            format!("RoleCount({}) < 1 AND CanBuildRole({})", entry.role, entry.role),
            condition,
            autarch_actions::produce_role(entry.role, 1),
        ));

        if entry.governing_weight >= WEIGHT_EXTREME {
            let extra_condition = if water_gated {
                cond::and(
                    cond::and(cond::role_count_below(entry.role, 2), cond::can_build_role(entry.role)),
                    cond::map_has_water(),
                )
            } else {
                cond::and(cond::role_count_below(entry.role, 2), cond::can_build_role(entry.role))
            };
            out.push(rule(
                format!("military_building_{}_extreme", entry.role),
                priority::MILITARY_BUILDING_MAX,
                Category::MilitaryBuilding,
                true,
                format!("Extreme weight duplicate of {}", entry.role),
                extra_condition,
                autarch_actions::produce_role(entry.role, 1),
            ));
        }
    }
    out
}
