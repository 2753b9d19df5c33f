//! Non-exclusive micro behaviors: retreat, recall, harvester safety, and
//! (for aggressive doctrines) focused fire. All run every tick regardless
//! of what else fires, so none of these rules are exclusive.

use autarch_core::constants::{
    HARVESTER_FLEE_RADIUS_BASE, SQUAD_DISENGAGE_THREAT_RATIO, UNIT_RETREAT_CLEAR_THRESHOLD, UNIT_RETREAT_THRESHOLD,
    WEIGHT_HIGH,
};
use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::rule;
use crate::{cond, priority, roles};

const SQUAD_SENSE_RADIUS: f64 = 600.0;

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let mut out = vec![
        rule(
            "micro_retreat_damaged_units",
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            format!("HasDamagedCombatUnits({UNIT_RETREAT_THRESHOLD})"),
            cond::has_damaged_combat_units(UNIT_RETREAT_THRESHOLD),
            autarch_actions::retreat_damaged_units(UNIT_RETREAT_THRESHOLD),
        ),
        rule(
            "micro_clear_healed_retreaters",
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            format!("Always (checks retreat set internally, threshold {UNIT_RETREAT_CLEAR_THRESHOLD})"),
            cond::always(),
            autarch_actions::clear_healed_retreaters(UNIT_RETREAT_CLEAR_THRESHOLD),
        ),
        rule(
            "micro_flee_harvesters",
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            format!("HasIdleHarvesters() OR harvester within {HARVESTER_FLEE_RADIUS_BASE}"),
            cond::always(),
            autarch_actions::flee_harvesters(harvester_flee_radius(doctrine)),
        ),
    ];

    for squad in [roles::GROUND_ATTACK_SQUAD, roles::AIR_ATTACK_SQUAD, roles::NAVAL_ATTACK_SQUAD] {
        out.push(rule(
            format!("micro_recall_overextended_{squad}"),
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            format!("SquadExists({squad})"),
            cond::squad_exists(squad),
            autarch_actions::recall_overextended(squad),
        ));
        out.push(rule(
            format!("micro_disengage_{squad}"),
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            format!("SquadThreatRatio({squad}) >= {SQUAD_DISENGAGE_THREAT_RATIO}"),
            cond::squad_threat_ratio_at_least(squad, SQUAD_SENSE_RADIUS, SQUAD_DISENGAGE_THREAT_RATIO),
            autarch_actions::disengage_squad(squad, SQUAD_SENSE_RADIUS),
        ));
    }

    // Only an aggression-leaning doctrine bothers micromanaging target
    // priority; a passive one leaves focus fire to the game's own AI.
    if doctrine.aggression >= WEIGHT_HIGH {
        out.push(rule(
            "micro_focus_fire_weakest",
            priority::MICRO_PRIORITY,
            Category::Micro,
            false,
            "EnemiesVisible()",
            cond::enemies_visible(),
            autarch_actions::focus_fire_weakest(),
        ));
    }

    out
}

fn harvester_flee_radius(doctrine: &Doctrine) -> f64 {
    let shrink = 1.0 - (doctrine.economy as f64 * 0.3);
    HARVESTER_FLEE_RADIUS_BASE * shrink.max(0.4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_micro_rules_are_non_exclusive() {
        let doctrine = Doctrine {
            aggression: 1.0,
            ..Doctrine::default()
        };
        for r in rules(&doctrine) {
            assert!(!r.exclusive, "{} should not be exclusive", r.name);
        }
    }

    #[test]
    fn focus_fire_only_appears_for_aggressive_doctrines() {
        let passive = Doctrine::default();
        assert!(rules(&passive).iter().all(|r| r.name != "micro_focus_fire_weakest"));

        let aggressive = Doctrine {
            aggression: 0.9,
            ..Doctrine::default()
        };
        assert!(rules(&aggressive).iter().any(|r| r.name == "micro_focus_fire_weakest"));
    }
}
