//! Tech center and the superweapon buildings that require it.

use autarch_core::constants::WEIGHT_HIGH;
use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::rule;
use crate::{cond, priority, roles};

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let mut out = Vec::new();

    if doctrine.tech <= 0.0 {
        return out;
    }

    out.push(rule(
        "tech_center",
        priority::TECH_MAX,
        Category::Tech,
        true,
        "HasRole(radar) AND RoleCount(tech_center) < 1 AND CanBuildRole(tech_center)",
        cond::and(
            cond::has_role(roles::RADAR),
            cond::and(cond::role_count_below(roles::TECH_CENTER, 1), cond::can_build_role(roles::TECH_CENTER)),
        ),
        autarch_actions::produce_role(roles::TECH_CENTER, 1),
    ));

    if doctrine.superweapon > 0.0 {
        out.push(rule(
            "tech_missile_silo",
            priority::TECH_MIN + 10,
            Category::Tech,
            true,
            "HasRole(tech_center) AND RoleCount(missile_silo) < 1 AND CanBuildRole(missile_silo)",
            cond::and(
                cond::has_role(roles::TECH_CENTER),
                cond::and(cond::role_count_below(roles::MISSILE_SILO, 1), cond::can_build_role(roles::MISSILE_SILO)),
            ),
            autarch_actions::produce_role(roles::MISSILE_SILO, 1),
        ));
    }

    if doctrine.superweapon >= WEIGHT_HIGH {
        out.push(rule(
            "tech_iron_curtain_building",
            priority::TECH_MIN,
            Category::Tech,
            true,
            "HasRole(tech_center) AND RoleCount(iron_curtain_building) < 1 AND CanBuildRole(iron_curtain_building)",
            cond::and(
                cond::has_role(roles::TECH_CENTER),
                cond::and(
                    cond::role_count_below(roles::IRON_CURTAIN_BUILDING, 1),
                    cond::can_build_role(roles::IRON_CURTAIN_BUILDING),
                ),
            ),
            autarch_actions::produce_role(roles::IRON_CURTAIN_BUILDING, 1),
        ));
    }

    out
}
