//! Reconnaissance: a dedicated scout role always walks the search pattern
//! while the scout weight is active, and any doctrine can spare idle
//! ground units for the same sweep once the enemy hasn't been spotted.

use autarch_core::doctrine::Doctrine;
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::{lerp_priority, rule};
use crate::{cond, priority, roles};

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let mut out = Vec::new();

    if doctrine.scout > 0.0 {
        let prio = lerp_priority(doctrine.scout, priority::RECON_MIN, priority::RECON_MAX);
        out.push(rule(
            "recon_dedicated_scout",
            prio,
            Category::Recon,
            false,
            format!("HasRole({})", roles::RANGER_SCOUT),
            cond::has_role(roles::RANGER_SCOUT),
            autarch_actions::dedicated_scout(roles::RANGER_SCOUT),
        ));
    }

    out.push(rule(
        "recon_general_scout",
        priority::RECON_MIN,
        Category::Recon,
        false,
        "!HasEnemyIntel() AND HasUnassignedIdleGround()",
        cond::and(cond::not(cond::has_enemy_intel()), cond::has_unassigned_idle_ground()),
        autarch_actions::general_scout(),
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_scout_rule_always_present() {
        let doctrine = Doctrine::default();
        assert!(rules(&doctrine).iter().any(|r| r.name == "recon_general_scout"));
    }

    #[test]
    fn dedicated_scout_rule_requires_scout_weight() {
        let passive = Doctrine::default();
        assert!(rules(&passive).iter().all(|r| r.name != "recon_dedicated_scout"));

        let scouting = Doctrine {
            scout: 0.5,
            ..Doctrine::default()
        };
        assert!(rules(&scouting).iter().any(|r| r.name == "recon_dedicated_scout"));
    }
}
