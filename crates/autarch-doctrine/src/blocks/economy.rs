//! Economic buildings: power, refineries, radar, advanced power, ore silo.
//! Thresholds scale with the economy weight so a more economy-minded
//! doctrine builds ahead of need rather than reacting to a deficit.

use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::{lerp_cap, rule};
use crate::{cond, priority, roles};

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let economy = doctrine.economy;
    let power_margin = 100.0 + 400.0 * economy as f64;
    let refinery_cap = lerp_cap(economy, 1, 4).max(1);

    let any_military_path = doctrine.vehicle > 0.0 || doctrine.air > 0.0 || doctrine.naval > 0.0 || doctrine.tech > 0.0;

    let mut out = vec![
        rule(
            "economy_build_power",
            priority::ECONOMY_MAX,
            Category::Economy,
            true,
            "PowerExcess() < margin AND CanBuildRole(power_plant)",
            cond::and(cond::power_excess_below(power_margin), cond::can_build_role(roles::POWER_PLANT)),
            autarch_actions::produce_role(roles::POWER_PLANT, 1),
        ),
        rule(
            "economy_initial_refinery",
            priority::ECONOMY_MAX - 5,
            Category::Economy,
            true,
            "RoleCount(refinery) < 1 AND CanBuildRole(refinery)",
            cond::and(cond::role_count_below(roles::REFINERY, 1), cond::can_build_role(roles::REFINERY)),
            autarch_actions::produce_role(roles::REFINERY, 1),
        ),
        rule(
            "economy_expansion_refinery",
            priority::ECONOMY_MIN + 10,
            Category::Economy,
            true,
            "RoleCount(refinery) < cap AND CanBuildRole(refinery)",
            cond::and(cond::role_count_below(roles::REFINERY, refinery_cap), cond::can_build_role(roles::REFINERY)),
            autarch_actions::produce_role(roles::REFINERY, 1),
        ),
        rule(
            "economy_ore_silo",
            priority::ECONOMY_MIN,
            Category::Economy,
            true,
            "ResourcesNearCap() AND CanBuildRole(ore_silo)",
            cond::and(cond::resources_near_cap(), cond::can_build_role(roles::ORE_SILO)),
            autarch_actions::produce_role(roles::ORE_SILO, 1),
        ),
    ];

    if any_military_path {
        out.push(rule(
            "economy_radar",
            priority::ECONOMY_MIN + 5,
            Category::Economy,
            true,
            "!HasRole(radar) AND CanBuildRole(radar)",
            cond::and(cond::not(cond::has_role(roles::RADAR)), cond::can_build_role(roles::RADAR)),
            autarch_actions::produce_role(roles::RADAR, 1),
        ));
    }

    if economy >= autarch_core::constants::WEIGHT_SIGNIFICANT {
        out.push(rule(
            "economy_advanced_power",
            priority::ECONOMY_MIN + 2,
            Category::Economy,
            true,
            "Economy >= Significant AND CanBuildRole(advanced_power)",
            cond::can_build_role(roles::ADVANCED_POWER),
            autarch_actions::produce_role(roles::ADVANCED_POWER, 1),
        ));
    }

    out
}
