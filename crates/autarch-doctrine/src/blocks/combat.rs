//! Squad-based combat: formation, engage, re-engage, known-base hunt, and
//! the air scramble. One named squad per domain; priorities follow the
//! documented relative offsets (formation above its engage rule, re-engage
//! below it, hunt further below, air/naval offset below ground).

use autarch_core::doctrine::Doctrine;
use autarch_core::memory::{Domain, SquadRole};
use autarch_core::rule::Category;
use autarch_rules::Rule;

use crate::builder::{lerp_priority, rule};
use crate::{cond, priority, roles};

/// Share of a squad's target size that must be present and ready before a
/// coordinated launch. Re-engage has no such gate: a squad already
/// committed to a fight keeps fighting regardless of reinforcement state.
const READY_RATIO: f64 = 0.8;

struct DomainSpec {
    squad: &'static str,
    domain: Domain,
    governing_weight: f32,
    target_size: u32,
    priority_offset: i32,
    requires_water: bool,
}

pub fn rules(doctrine: &Doctrine) -> Vec<Rule> {
    let specs = [
        DomainSpec {
            squad: roles::GROUND_ATTACK_SQUAD,
            domain: Domain::Ground,
            governing_weight: doctrine.aggression,
            target_size: doctrine.ground_group_size,
            priority_offset: 0,
            requires_water: false,
        },
        DomainSpec {
            squad: roles::AIR_ATTACK_SQUAD,
            domain: Domain::Air,
            governing_weight: doctrine.aggression.min(doctrine.air),
            target_size: doctrine.air_group_size,
            priority_offset: priority::COMBAT_AIR_OFFSET,
            requires_water: false,
        },
        DomainSpec {
            squad: roles::NAVAL_ATTACK_SQUAD,
            domain: Domain::Naval,
            governing_weight: doctrine.aggression.min(doctrine.naval),
            target_size: doctrine.naval_group_size,
            priority_offset: priority::COMBAT_NAVAL_OFFSET,
            requires_water: true,
        },
    ];

    let mut out = Vec::new();
    for spec in specs {
        if spec.governing_weight <= 0.0 || spec.target_size == 0 {
            continue;
        }

        let engage_prio = lerp_priority(spec.governing_weight, priority::COMBAT_ENGAGE_MIN, priority::COMBAT_ENGAGE_MAX)
            + spec.priority_offset;
        let formation_prio = engage_prio + priority::COMBAT_FORMATION_OFFSET;
        let reengage_prio = engage_prio + priority::COMBAT_REENGAGE_OFFSET;
        let hunt_prio = engage_prio + priority::COMBAT_HUNT_OFFSET;

        let gated = |c: autarch_rules::CompiledCondition| {
            if spec.requires_water {
                cond::and(c, cond::map_has_water())
            } else {
                c
            }
        };

        out.push(rule(
            format!("combat_formation_{}", spec.squad),
            formation_prio,
            Category::Combat,
            true,
            format!("SquadNeedsReinforcement({})", spec.squad),
            gated(cond::squad_needs_reinforcement(spec.squad)),
            autarch_actions::form_squad(spec.squad, spec.domain, spec.target_size, SquadRole::Attack),
        ));

        out.push(rule(
            format!("combat_engage_{}", spec.squad),
            engage_prio,
            Category::Combat,
            true,
            format!("SquadReadyRatio({}) >= {READY_RATIO} AND EnemiesVisible()", spec.squad),
            gated(cond::and(
                cond::squad_ready_ratio_at_least(spec.squad, READY_RATIO),
                cond::enemies_visible(),
            )),
            autarch_actions::engage_squad(spec.squad),
        ));

        out.push(rule(
            format!("combat_reengage_{}", spec.squad),
            reengage_prio,
            Category::Combat,
            true,
            format!("SquadExists({}) AND EnemiesVisible()", spec.squad),
            gated(cond::and(cond::squad_exists(spec.squad), cond::enemies_visible())),
            autarch_actions::engage_squad(spec.squad),
        ));

        out.push(rule(
            format!("combat_hunt_{}", spec.squad),
            hunt_prio,
            Category::Combat,
            true,
            format!("SquadExists({}) AND !EnemiesVisible() AND HasEnemyIntel()", spec.squad),
            gated(cond::and(
                cond::squad_exists(spec.squad),
                cond::and(cond::not(cond::enemies_visible()), cond::has_enemy_intel()),
            )),
            autarch_actions::hunt_action(spec.squad, doctrine.aggression as f64),
        ));
    }

    // Core already scrambles idle ground and naval units onto an attacked
    // base unconditionally; air interception is a doctrine choice, not a
    // baseline safety net, so it lives here gated on air defense weight.
    if doctrine.air_defense > 0.0 {
        out.push(rule(
            "combat_scramble_air",
            lerp_priority(doctrine.air_defense, priority::COMBAT_ENGAGE_MIN, priority::COMBAT_ENGAGE_MAX),
            Category::Combat,
            true,
            "BaseUnderAttack()",
            cond::base_under_attack(),
            autarch_actions::scramble_defense(Domain::Air),
        ));
    }

    out
}
