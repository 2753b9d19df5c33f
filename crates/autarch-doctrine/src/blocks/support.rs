//! Support powers: nuke and iron curtain target the enemy, spy plane and
//! the paratrooper/parabomb drops exist purely under the superweapon
//! weight, since they all require the matching building from the tech
//! block before the game will ever report them ready.

use autarch_core::constants::WEIGHT_HIGH;
use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::lerp_priority;
use crate::builder::rule;
use crate::{cond, priority, roles};

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let mut out = Vec::new();

    if doctrine.superweapon <= 0.0 {
        return out;
    }

    let prio = lerp_priority(doctrine.superweapon, priority::SUPPORT_POWER_MIN, priority::SUPPORT_POWER_MAX);

    out.push(rule(
        "support_nuke",
        prio,
        Category::SupportPower,
        true,
        format!("SupportPowerReady({}) AND EnemiesVisible()", roles::NUKE_POWER),
        cond::and(cond::support_power_ready(roles::NUKE_POWER), cond::enemies_visible()),
        autarch_actions::fire_support_power(roles::NUKE_POWER, true),
    ));

    if doctrine.superweapon >= WEIGHT_HIGH {
        out.push(rule(
            "support_iron_curtain",
            prio,
            Category::SupportPower,
            true,
            format!("SupportPowerReady({})", roles::IRON_CURTAIN_POWER),
            cond::support_power_ready(roles::IRON_CURTAIN_POWER),
            autarch_actions::fire_support_power(roles::IRON_CURTAIN_POWER, false),
        ));

        out.push(rule(
            "support_paratroopers",
            prio,
            Category::SupportPower,
            true,
            format!("SupportPowerReady({})", roles::PARATROOPERS_POWER),
            cond::support_power_ready(roles::PARATROOPERS_POWER),
            autarch_actions::fire_support_power(roles::PARATROOPERS_POWER, true),
        ));

        out.push(rule(
            "support_parabombs",
            prio,
            Category::SupportPower,
            true,
            format!("SupportPowerReady({}) AND EnemiesVisible()", roles::PARABOMBS_POWER),
            cond::and(cond::support_power_ready(roles::PARABOMBS_POWER), cond::enemies_visible()),
            autarch_actions::fire_support_power(roles::PARABOMBS_POWER, true),
        ));
    }

    // Spy plane has no cash or target gate beyond readiness: it's cheap
    // intel a superweapon-leaning doctrine keeps refreshing on cooldown.
    out.push(rule(
        "support_spy_plane",
        prio - 1,
        Category::SupportPower,
        true,
        format!("SupportPowerReady({})", roles::SPY_PLANE_POWER),
        cond::support_power_ready(roles::SPY_PLANE_POWER),
        autarch_actions::fire_support_power(roles::SPY_PLANE_POWER, true),
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rules_below_zero_superweapon_weight() {
        let doctrine = Doctrine::default();
        assert!(rules(&doctrine).is_empty());
    }

    #[test]
    fn high_weight_unlocks_iron_curtain_and_drops() {
        let doctrine = Doctrine {
            superweapon: 0.9,
            ..Doctrine::default()
        };
        let names: Vec<&str> = rules(&doctrine).iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"support_iron_curtain"));
        assert!(names.contains(&"support_paratroopers"));
        assert!(names.contains(&"support_parabombs"));
    }
}
