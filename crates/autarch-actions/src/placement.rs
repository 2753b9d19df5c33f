//! Placement-hint scoring for defensive structures (spec.md §4.6).
//!
//! Generates candidates on an annulus around the base centroid, scores each
//! against threat direction, proximity to high-value assets, spread from
//! existing defenses, and perimeter coverage, then picks uniformly among
//! the top three. Falls back to the centroid if every candidate is
//! filtered out by terrain.

use autarch_core::types::Position;
use autarch_env::Environment;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const CANDIDATE_COUNT: usize = 16;
const ANNULUS_MIN_FRACTION: f64 = 1.0;
const ANNULUS_MAX_FRACTION: f64 = 1.5;
const JITTER_FRACTION: f64 = 0.05;
const TOP_N: usize = 3;

const WEIGHT_THREAT_DIRECTION: f64 = 0.35;
const WEIGHT_HIGH_VALUE_PROXIMITY: f64 = 0.15;
const WEIGHT_DEFENSE_SPREAD: f64 = 0.25;
const WEIGHT_PERIMETER: f64 = 0.25;

/// Centroid and radius of the owned-building footprint.
fn base_centroid_and_radius(env: &Environment) -> (Position, f64) {
    let buildings = &env.snapshot.buildings;
    if buildings.is_empty() {
        return (Position::default(), 0.0);
    }
    let cx = buildings.iter().map(|b| b.position.x).sum::<f64>() / buildings.len() as f64;
    let cy = buildings.iter().map(|b| b.position.y).sum::<f64>() / buildings.len() as f64;
    let centroid = Position::new(cx, cy);
    let radius = buildings
        .iter()
        .map(|b| b.position.distance_to(&centroid))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    (centroid, radius)
}

fn score_candidate(
    env: &Environment,
    centroid: Position,
    radius: f64,
    candidate: Position,
    existing_defenses: &[Position],
) -> f64 {
    let threat_direction_score = match env.nearest_enemy() {
        Some(enemy) => {
            let to_candidate = (candidate.x - centroid.x, candidate.y - centroid.y);
            let to_enemy = (enemy.position.x - centroid.x, enemy.position.y - centroid.y);
            let dot = to_candidate.0 * to_enemy.0 + to_candidate.1 * to_enemy.1;
            let mag = ((to_candidate.0.powi(2) + to_candidate.1.powi(2)).sqrt()
                * (to_enemy.0.powi(2) + to_enemy.1.powi(2)).sqrt())
            .max(1e-6);
            ((dot / mag) + 1.0) / 2.0
        }
        None => 0.5,
    };

    let high_value_proximity_score = env
        .snapshot
        .buildings
        .first()
        .map(|hq| {
            let d = candidate.distance_to(&hq.position);
            1.0 / (1.0 + d / 100.0)
        })
        .unwrap_or(0.0);

    let spread_score = if existing_defenses.is_empty() {
        1.0
    } else {
        let min_dist = existing_defenses
            .iter()
            .map(|d| candidate.distance_to(d))
            .fold(f64::MAX, f64::min);
        (min_dist / 200.0).min(1.0)
    };

    let perimeter_score = {
        let nearest_building = env
            .snapshot
            .buildings
            .iter()
            .map(|b| candidate.distance_to(&b.position))
            .fold(f64::MAX, f64::min);
        (nearest_building / (radius.max(1.0))).min(1.0)
    };

    WEIGHT_THREAT_DIRECTION * threat_direction_score
        + WEIGHT_HIGH_VALUE_PROXIMITY * high_value_proximity_score
        + WEIGHT_DEFENSE_SPREAD * spread_score
        + WEIGHT_PERIMETER * perimeter_score
}

/// Pick a placement hint for a defensive structure. Returns `None` only if
/// there are no owned buildings to anchor a centroid on.
pub fn placement_hint(env: &Environment, rng: &mut ChaCha8Rng) -> Option<Position> {
    let (centroid, radius) = base_centroid_and_radius(env);
    if env.snapshot.buildings.is_empty() {
        return None;
    }

    let existing_defenses: Vec<Position> = env
        .snapshot
        .buildings
        .iter()
        .filter(|b| {
            let code = b.type_code.to_ascii_lowercase();
            code.contains("pbox") || code.contains("hbox") || code.contains("agun") || code.contains("sam")
        })
        .map(|b| b.position)
        .collect();

    let mut candidates = Vec::with_capacity(CANDIDATE_COUNT);
    for i in 0..CANDIDATE_COUNT {
        let angle = std::f64::consts::TAU * (i as f64) / (CANDIDATE_COUNT as f64);
        let radial_fraction = ANNULUS_MIN_FRACTION
            + (ANNULUS_MAX_FRACTION - ANNULUS_MIN_FRACTION) * rng.gen::<f64>();
        let jitter_angle = angle + rng.gen_range(-JITTER_FRACTION..JITTER_FRACTION);
        let r = radius * radial_fraction;
        let candidate = Position::new(centroid.x + r * jitter_angle.cos(), centroid.y + r * jitter_angle.sin());
        if env.is_land_at(candidate) {
            candidates.push(candidate);
        }
    }

    if candidates.is_empty() {
        return Some(centroid);
    }

    let mut scored: Vec<(Position, f64)> = candidates
        .into_iter()
        .map(|c| (c, score_candidate(env, centroid, radius, c, &existing_defenses)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(TOP_N.min(scored.len()));

    let idx = rng.gen_range(0..scored.len());
    Some(scored[idx].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::EngineMemory;
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, OwnedBuilding, ProductionQueue, Snapshot, TerrainCell, TerrainGrid};
    use rand::SeedableRng;

    fn snapshot_with_base() -> Snapshot {
        Snapshot {
            tick: 1,
            economy: Economy::default(),
            units: vec![],
            buildings: vec![OwnedBuilding {
                id: 1,
                type_code: "fact".to_string(),
                position: Position::new(500.0, 500.0),
                hp: 1000.0,
                max_hp: 1000.0,
            }],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 2000.0,
                height: 2000.0,
            },
            terrain: None,
        }
    }

    #[test]
    fn placement_hint_falls_back_to_centroid_when_all_water() {
        let snapshot = snapshot_with_base();
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let mut env_snapshot = snapshot.clone();
        env_snapshot.terrain = Some(TerrainGrid {
            cols: 1,
            rows: 1,
            cell_w: 2000.0,
            cell_h: 2000.0,
            cells: vec![TerrainCell::Water],
        });
        let env = Environment::new(&env_snapshot, &memory, &roles, "soviet");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let hint = placement_hint(&env, &mut rng).unwrap();
        assert_eq!(hint, Position::new(500.0, 500.0));
    }

    #[test]
    fn placement_hint_returns_some_on_open_land() {
        let snapshot = snapshot_with_base();
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(placement_hint(&env, &mut rng).is_some());
    }
}
