//! Target scoring for `BestGroundTarget`/`BestAirTarget` (spec.md §4.1).
//!
//! Score = `typeValue * (1 + damageBonus) / distance`. `typeValue` ranks by
//! a fixed priority table; `damageBonus` favors units already wounded, so a
//! nearly-dead high-value target outranks a full-health one at the same
//! range.

use autarch_core::snapshot::EnemyUnit;
use autarch_core::types::Position;

/// Fixed priority table, highest first. A type code is scored by the first
/// tier whose marker it contains; anything unmatched falls into the lowest,
/// generic-unit tier.
const TIERS: &[(&[&str], f64)] = &[
    (&["tsla"], 100.0),
    (&["ftur", "flame"], 90.0),
    (&["agun", "sam", "pbox", "hbox"], 80.0),
    (&["weap", "barr", "airf", "syrd"], 60.0),
    (&["stek", "atek", "dome"], 50.0),
    (&["proc", "powr", "apwr", "silo"], 40.0),
];

/// Base value for anything not matched by a more specific tier above.
const GENERIC_UNIT_VALUE: f64 = 20.0;

/// Floor distance so a target sitting on the origin doesn't score infinite.
const MIN_DISTANCE: f64 = 1.0;

pub fn target_type_value(type_code: &str) -> f64 {
    let lower = type_code.to_ascii_lowercase();
    for (markers, value) in TIERS {
        if markers.iter().any(|m| lower.contains(m)) {
            return *value;
        }
    }
    GENERIC_UNIT_VALUE
}

fn damage_bonus(unit: &EnemyUnit) -> f64 {
    if unit.max_hp <= 0.0 {
        return 0.0;
    }
    1.0 - (unit.hp / unit.max_hp).clamp(0.0, 1.0)
}

fn score(unit: &EnemyUnit, origin: Position) -> f64 {
    let distance = unit.position.distance_to(&origin).max(MIN_DISTANCE);
    target_type_value(&unit.type_code) * (1.0 + damage_bonus(unit)) / distance
}

fn best_by<'a>(enemies: impl Iterator<Item = &'a EnemyUnit>, origin: Position) -> Option<&'a EnemyUnit> {
    enemies
        .map(|u| (u, score(u, origin)))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(u, _)| u)
}

/// Best ground target among all visible enemies, scored by distance from `origin`.
pub fn best_ground_target<'a>(
    enemies: impl Iterator<Item = &'a EnemyUnit>,
    origin: Position,
) -> Option<&'a EnemyUnit> {
    best_by(enemies.filter(|u| !is_air_type(&u.type_code)), origin)
}

pub fn best_air_target<'a>(
    enemies: impl Iterator<Item = &'a EnemyUnit>,
    origin: Position,
) -> Option<&'a EnemyUnit> {
    best_by(enemies.filter(|u| is_air_type(&u.type_code)), origin)
}

fn is_air_type(type_code: &str) -> bool {
    const AIR_MARKERS: &[&str] = &["yak", "mig", "heli", "orca", "air"];
    AIR_MARKERS.iter().any(|m| type_code.to_ascii_lowercase().contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(type_code: &str, hp: f64, max_hp: f64, x: f64, y: f64) -> EnemyUnit {
        EnemyUnit {
            id: 1,
            owner: "enemy".to_string(),
            type_code: type_code.to_string(),
            position: Position::new(x, y),
            hp,
            max_hp,
            is_building: false,
        }
    }

    #[test]
    fn tesla_outranks_generic_unit() {
        assert!(target_type_value("tsla") > target_type_value("e1"));
    }

    #[test]
    fn damaged_target_scores_higher_than_full_health_at_same_range() {
        let origin = Position::new(0.0, 0.0);
        let fresh = enemy_at("powr", 100.0, 100.0, 10.0, 0.0);
        let wounded = enemy_at("powr", 10.0, 100.0, 10.0, 0.0);
        assert!(score(&wounded, origin) > score(&fresh, origin));
    }

    #[test]
    fn nearer_target_outscores_farther_target_of_equal_type() {
        let origin = Position::new(0.0, 0.0);
        let near = enemy_at("e1", 100.0, 100.0, 10.0, 0.0);
        let far = enemy_at("e1", 100.0, 100.0, 1000.0, 0.0);
        assert!(score(&near, origin) > score(&far, origin));
    }

    #[test]
    fn best_air_target_excludes_ground_units() {
        let origin = Position::new(0.0, 0.0);
        let units = vec![
            enemy_at("e1", 100.0, 100.0, 5.0, 0.0),
            enemy_at("mig", 50.0, 50.0, 5.0, 0.0),
        ];
        let best = best_air_target(units.iter(), origin).unwrap();
        assert_eq!(best.type_code, "mig");
    }
}
