//! Base defenses: priority and cap interpolate with the governing weight,
//! so a high-defense doctrine both builds more of them and insists on
//! building them sooner relative to everything else.

use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::{lerp_cap, lerp_priority, rule};
use crate::{cond, priority, roles};

const DEFENSE_CAP_MIN: u32 = 2;
const DEFENSE_CAP_MAX: u32 = 10;

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let mut out = Vec::new();

    if doctrine.ground_defense > 0.0 {
        let cap = lerp_cap(doctrine.ground_defense, DEFENSE_CAP_MIN, DEFENSE_CAP_MAX);
        let prio = lerp_priority(doctrine.ground_defense, priority::DEFENSE_MIN, priority::DEFENSE_MAX);
        out.push(rule(
            "defense_base_defense",
            prio,
            Category::Defense,
            true,
            "RoleCount(base_defense) < cap AND CanBuildRole(base_defense)",
            cond::and(cond::role_count_below(roles::BASE_DEFENSE, cap), cond::can_build_role(roles::BASE_DEFENSE)),
            autarch_actions::produce_role(roles::BASE_DEFENSE, 1),
        ));
    }

    if doctrine.air_defense > 0.0 {
        let cap = lerp_cap(doctrine.air_defense, DEFENSE_CAP_MIN, DEFENSE_CAP_MAX);
        let prio = lerp_priority(doctrine.air_defense, priority::DEFENSE_MIN, priority::DEFENSE_MAX);
        out.push(rule(
            "defense_aa",
            prio,
            Category::Defense,
            true,
            "RoleCount(aa_defense) < cap AND CanBuildRole(aa_defense)",
            cond::and(cond::role_count_below(roles::AA_DEFENSE, cap), cond::can_build_role(roles::AA_DEFENSE)),
            autarch_actions::produce_role(roles::AA_DEFENSE, 1),
        ));
    }

    if doctrine.ground_defense.max(doctrine.air_defense) >= autarch_core::constants::WEIGHT_HIGH {
        out.push(rule(
            "defense_gap_generator",
            priority::DEFENSE_MIN,
            Category::Defense,
            true,
            "RoleCount(gap_generator) < 1 AND CanBuildRole(gap_generator)",
            cond::and(cond::role_count_below(roles::GAP_GENERATOR, 1), cond::can_build_role(roles::GAP_GENERATOR)),
            autarch_actions::produce_role(roles::GAP_GENERATOR, 1),
        ));
    }

    out
}
