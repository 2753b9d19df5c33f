//! Known-base hunt: a radial sweep of a remembered enemy centroid when no
//! enemy is currently visible (spec.md §4.6).
//!
//! Step 0 is the centroid itself; steps 1-8 sit on an inner compass ring,
//! 9-16 on an outer ring. The sweep advances one step per fire and wraps
//! 16 -> 1, but resets to the centroid the first time it fires after the
//! remembered intel has moved. For non-air squads, a stepped target that
//! lands on terrain the squad's domain can't cross falls back to the
//! remembered base centroid instead, the same terrain-fallback idiom
//! `placement.rs` and `scout.rs` use.

use std::sync::Arc;

use autarch_core::memory::{Domain, HuntState};
use autarch_core::snapshot::{TerrainCell, TerrainGrid};
use autarch_core::types::{MapDims, Position};
use autarch_core::wire::OutboundCommand;
use autarch_rules::{ActionContext, ActionError, CompiledAction};
use autarch_terrain::ring_points;

const RING_POINTS: u32 = 8;
const TOTAL_STEPS: u32 = 2 * RING_POINTS;

/// Radius of the inner ring as a fraction of `map_dim / 16`, scaled up with
/// aggression (spec.md §4.6 / §9's documented open-question constants).
fn inner_ring_radius(map: MapDims, aggression: f64) -> f64 {
    let map_dim = map.width.max(map.height) / 16.0;
    (autarch_core::constants::HUNT_RING_BASE_FACTOR
        + autarch_core::constants::HUNT_RING_AGGRESSION_FACTOR * aggression)
        * map_dim
}

/// Advance the hunt state for a squad whose remembered base centroid is
/// `base`, and return the target position for this fire. If `base` differs
/// from the state's last-known base (fresh intel), resets to the centroid.
pub fn advance_hunt(state: &mut HuntState, base: Position, map: MapDims, aggression: f64) -> Position {
    let base_changed = (state.base_x, state.base_y) != (base.x, base.y);
    if base_changed {
        state.base_x = base.x;
        state.base_y = base.y;
        state.step = 0;
        return base;
    }

    state.step = if state.step == 0 {
        1
    } else {
        (state.step % TOTAL_STEPS) + 1
    };

    let inner_radius = inner_ring_radius(map, aggression);
    let outer_radius = inner_radius * 2.0;

    let target = if state.step <= RING_POINTS {
        let points = ring_points(base, inner_radius, RING_POINTS);
        points[(state.step - 1) as usize]
    } else {
        let points = ring_points(base, outer_radius, RING_POINTS);
        points[(state.step - 1 - RING_POINTS) as usize]
    };

    clamp_to_map(target, map)
}

fn clamp_to_map(pos: Position, map: MapDims) -> Position {
    Position::new(pos.x.clamp(0.0, map.width), pos.y.clamp(0.0, map.height))
}

/// True if `domain` can cross the terrain at `pos`. Air squads ignore
/// terrain entirely. Ground squads need non-water, same pointwise rule as
/// `autarch_env::Environment::is_land_at` (permissive without a grid). Naval
/// squads need water, but a missing grid is treated as passable rather than
/// pointwise-water-only (`is_water_at`'s literal rule): naval formation is
/// already gated on `map_has_water()`'s "unknown means assume water exists"
/// stance, so the hunt step would otherwise retreat to centroid on every
/// fire on a terrain-unaware map.
fn domain_can_cross(terrain: Option<&TerrainGrid>, domain: Domain, pos: Position) -> bool {
    let cell = terrain.map(|grid| grid.cell_at(pos));
    match domain {
        Domain::Air => true,
        Domain::Ground => !matches!(cell, Some(TerrainCell::Water)),
        Domain::Naval => terrain.is_none() || matches!(cell, Some(TerrainCell::Water)),
    }
}

/// As [`advance_hunt`], but for non-air squads falls back to the
/// remembered base centroid when the stepped target lands on terrain the
/// squad's domain can't cross (spec.md §4.6: "for non-air squads, terrain
/// check falls back to centroid on impassable").
pub fn advance_hunt_for_domain(
    state: &mut HuntState,
    base: Position,
    map: MapDims,
    aggression: f64,
    domain: Domain,
    terrain: Option<&TerrainGrid>,
) -> Position {
    let target = advance_hunt(state, base, map, aggression);
    if domain_can_cross(terrain, domain, target) {
        target
    } else {
        base
    }
}

/// Send a squad on the next step of the radial sweep around the nearest
/// remembered enemy base. No-op precondition failure when no base is known
/// or the squad has no members.
pub fn hunt_action(squad_name: &'static str, aggression: f64) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let base = {
            let env = ctx.environment();
            env.nearest_enemy_base()
        }
        .ok_or_else(|| ActionError::NoTarget(format!("no remembered base to hunt for {squad_name}")))?;

        let (members, domain) = ctx
            .memory
            .squads
            .get(squad_name)
            .map(|s| (s.members.clone(), s.domain))
            .ok_or_else(|| ActionError::PreconditionFailed(format!("squad {squad_name} does not exist")))?;
        if members.is_empty() {
            return Err(ActionError::PreconditionFailed(format!("squad {squad_name} is empty")));
        }

        let map = ctx.snapshot.map;
        let terrain = ctx.snapshot.terrain.as_ref();
        let state = ctx.memory.hunt_base.entry(squad_name.to_string()).or_default();
        let target = advance_hunt_for_domain(state, base, map, aggression, domain, terrain);

        Ok(vec![OutboundCommand::AttackMove {
            actor_ids: members,
            x: target.x,
            y: target.y,
        }])
    })
}
