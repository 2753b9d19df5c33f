//! Recon actions: a 9-point search pattern (map center plus an 8-point
//! compass ring) walked round-robin by an index held in engine memory.

use std::sync::Arc;

use autarch_core::constants::{SCOUT_RING_POINTS, SCOUT_RING_RADIUS_FRACTION};
use autarch_core::role::code_matches;
use autarch_core::types::{MapDims, Position};
use autarch_core::wire::OutboundCommand;
use autarch_rules::{ActionContext, ActionError, CompiledAction};
use autarch_terrain::ring_points;

const TOTAL_WAYPOINTS: u32 = SCOUT_RING_POINTS + 1;

/// The `idx`-th waypoint of the 9-point pattern: 0 is the map center, 1..=8
/// sit on a compass ring around it.
fn waypoint(map: MapDims, idx: u32) -> Position {
    let center = Position::new(map.width / 2.0, map.height / 2.0);
    if idx == 0 {
        return center;
    }
    let radius = map.width.min(map.height) / 2.0 * SCOUT_RING_RADIUS_FRACTION;
    let points = ring_points(center, radius, SCOUT_RING_POINTS);
    points[(idx - 1) as usize]
}

/// Move the first idle unit matching `type_marker` to the next waypoint in
/// the round-robin pattern, advancing `idx`.
fn scout_step(
    ctx: &mut ActionContext,
    type_marker: &str,
    idx: u32,
) -> Result<(Vec<OutboundCommand>, u32), ActionError> {
    let unit = ctx
        .snapshot
        .units
        .iter()
        .find(|u| u.idle && code_matches(&u.type_code, type_marker))
        .ok_or_else(|| ActionError::NoTarget(format!("no idle {type_marker} to scout with")))?;

    let target = waypoint(ctx.snapshot.map, idx);
    let next_idx = (idx + 1) % TOTAL_WAYPOINTS;
    Ok((
        vec![OutboundCommand::Move {
            actor_id: unit.id,
            x: target.x,
            y: target.y,
        }],
        next_idx,
    ))
}

/// Dedicated scout: always sends an idle ranger (or equivalent light scout
/// unit) to the next search waypoint, regardless of intel state.
pub fn dedicated_scout(type_marker: &'static str) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let idx = ctx.memory.scout_waypoint_idx;
        let (commands, next_idx) = scout_step(ctx, type_marker, idx)?;
        ctx.memory.scout_waypoint_idx = next_idx;
        Ok(commands)
    })
}

/// General scout: spends a spare idle ground unit on the same pattern.
/// Paired with a condition gating on "enemies not visible" at the doctrine
/// level, so this never pulls a unit away from a live fight.
pub fn general_scout() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let idx = ctx.memory.ranger_scout_idx;
        let unassigned_id = {
            let env = ctx.environment();
            env.unassigned_idle_ground().first().map(|u| u.id)
        };
        let unit_id = unassigned_id.ok_or_else(|| ActionError::NoTarget("no spare idle ground unit".to_string()))?;

        let target = waypoint(ctx.snapshot.map, idx);
        ctx.memory.ranger_scout_idx = (idx + 1) % TOTAL_WAYPOINTS;
        Ok(vec![OutboundCommand::Move {
            actor_id: unit_id,
            x: target.x,
            y: target.y,
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_zero_is_map_center() {
        let map = MapDims {
            width: 1000.0,
            height: 2000.0,
        };
        assert_eq!(waypoint(map, 0), Position::new(500.0, 1000.0));
    }

    #[test]
    fn waypoints_wrap_after_total_count() {
        let map = MapDims {
            width: 1000.0,
            height: 1000.0,
        };
        let first = waypoint(map, 0);
        let wrapped = waypoint(map, 0 % TOTAL_WAYPOINTS);
        assert_eq!(first, wrapped);
        assert_eq!(TOTAL_WAYPOINTS, 9);
    }
}
