//! Transport-assisted capture: load an idle engineer into an idle empty
//! APC, move the APC within range of a capturable, then unload so the
//! engineer can finish the capture on foot. Falls back to an on-foot walk
//! when no APC is available. The terminal step, once an engineer is in
//! range of the capturable, is the capture command itself (spec.md §4.6).

use std::sync::Arc;

use autarch_core::role::code_matches;
use autarch_core::snapshot::{Capturable, OwnedUnit};
use autarch_core::types::Position;
use autarch_core::wire::OutboundCommand;
use autarch_env::Environment;
use autarch_rules::{ActionContext, ActionError, CompiledAction};

/// Range within which an APC is close enough to a capturable to unload,
/// and within which an on-foot engineer is close enough to capture it.
const UNLOAD_RANGE: f64 = 5.0;

/// The next step of the capture sequence, given current unit state. Each
/// call emits at most one command; the caller re-evaluates next tick.
#[derive(Debug, PartialEq)]
pub enum CaptureStep {
    LoadEngineer { engineer_id: u32, apc_id: u32 },
    MoveApc { apc_id: u32, target: Position },
    Unload { apc_id: u32 },
    WalkOnFoot { engineer_id: u32, target: Position },
    Capture { engineer_id: u32, target_id: u32 },
    NoCapturablesOrEngineers,
}

fn nearest_capturable<'a>(capturables: &'a [Capturable], from: Position) -> Option<&'a Capturable> {
    capturables
        .iter()
        .filter(|c| c.owner.is_none())
        .min_by(|a, b| a.position.distance_to(&from).total_cmp(&b.position.distance_to(&from)))
}

fn idle_empty_apc(units: &[OwnedUnit]) -> Option<&OwnedUnit> {
    units
        .iter()
        .find(|u| u.idle && u.cargo == 0 && code_matches(&u.type_code, "apc"))
}

fn idle_unloaded_engineer(units: &[OwnedUnit]) -> Option<&OwnedUnit> {
    units.iter().find(|u| u.idle && code_matches(&u.type_code, "e6"))
}

/// Any on-foot engineer (idle or still walking in) already within capture
/// range of the target, regardless of how it got there.
fn engineer_in_range<'a>(units: &'a [OwnedUnit], target: Position) -> Option<&'a OwnedUnit> {
    units
        .iter()
        .find(|u| code_matches(&u.type_code, "e6") && u.position.distance_to(&target) <= UNLOAD_RANGE)
}

/// Determine the next capture step. Prefers an APC-assisted approach;
/// falls back to walking the engineer directly when no APC exists.
pub fn next_capture_step(env: &Environment) -> CaptureStep {
    let units = &env.snapshot.units;
    let anchor = env
        .snapshot
        .buildings
        .first()
        .map(|b| b.position)
        .unwrap_or_default();
    let Some(capturable) = nearest_capturable(&env.snapshot.capturables, anchor) else {
        return CaptureStep::NoCapturablesOrEngineers;
    };

    if let Some(engineer) = engineer_in_range(units, capturable.position) {
        return CaptureStep::Capture {
            engineer_id: engineer.id,
            target_id: capturable.id,
        };
    }

    if let Some(apc) = units
        .iter()
        .find(|u| code_matches(&u.type_code, "apc") && u.cargo > 0)
    {
        if apc.position.distance_to(&capturable.position) <= UNLOAD_RANGE {
            return CaptureStep::Unload { apc_id: apc.id };
        }
        return CaptureStep::MoveApc {
            apc_id: apc.id,
            target: capturable.position,
        };
    }

    if let (Some(apc), Some(engineer)) = (idle_empty_apc(units), idle_unloaded_engineer(units)) {
        return CaptureStep::LoadEngineer {
            engineer_id: engineer.id,
            apc_id: apc.id,
        };
    }

    if let Some(engineer) = idle_unloaded_engineer(units) {
        return CaptureStep::WalkOnFoot {
            engineer_id: engineer.id,
            target: capturable.position,
        };
    }

    CaptureStep::NoCapturablesOrEngineers
}

impl CaptureStep {
    pub fn into_command(self) -> Option<OutboundCommand> {
        match self {
            CaptureStep::LoadEngineer { engineer_id, apc_id } => Some(OutboundCommand::EnterTransport {
                actor_id: engineer_id,
                transport_id: apc_id,
            }),
            CaptureStep::MoveApc { apc_id, target } => Some(OutboundCommand::Move {
                actor_id: apc_id,
                x: target.x,
                y: target.y,
            }),
            CaptureStep::Unload { apc_id } => Some(OutboundCommand::Unload { actor_id: apc_id }),
            CaptureStep::WalkOnFoot { engineer_id, target } => Some(OutboundCommand::Move {
                actor_id: engineer_id,
                x: target.x,
                y: target.y,
            }),
            CaptureStep::Capture { engineer_id, target_id } => Some(OutboundCommand::Capture {
                actor_id: engineer_id,
                target_id,
            }),
            CaptureStep::NoCapturablesOrEngineers => None,
        }
    }
}

/// Drive the capture state machine for one tick: compute the next step
/// from the current environment and emit its command, if any.
pub fn capture_action() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let step = next_capture_step(&ctx.environment());
        match step.into_command() {
            Some(command) => Ok(vec![command]),
            None => Err(ActionError::PreconditionFailed(
                "no capturable target or available engineer".to_string(),
            )),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::EngineMemory;
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, ProductionQueue, Snapshot};

    fn base_snapshot(units: Vec<OwnedUnit>, capturables: Vec<Capturable>) -> Snapshot {
        Snapshot {
            tick: 1,
            economy: Economy::default(),
            units,
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables,
            support_powers: vec![],
            map: MapDims {
                width: 1000.0,
                height: 1000.0,
            },
            terrain: None,
        }
    }

    fn unit(id: u32, type_code: &str, idle: bool, cargo: u32, pos: Position) -> OwnedUnit {
        OwnedUnit {
            id,
            type_code: type_code.to_string(),
            position: pos,
            hp: 100.0,
            max_hp: 100.0,
            idle,
            cargo,
        }
    }

    fn capturable(pos: Position) -> Capturable {
        Capturable {
            id: 1,
            type_code: "civb".to_string(),
            position: pos,
            owner: None,
        }
    }

    #[test]
    fn loads_engineer_into_idle_apc_first() {
        let snapshot = base_snapshot(
            vec![
                unit(1, "e6", true, 0, Position::new(0.0, 0.0)),
                unit(2, "apc", true, 0, Position::new(0.0, 0.0)),
            ],
            vec![capturable(Position::new(500.0, 500.0))],
        );
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert_eq!(
            next_capture_step(&env),
            CaptureStep::LoadEngineer {
                engineer_id: 1,
                apc_id: 2
            }
        );
    }

    #[test]
    fn unloads_when_loaded_apc_in_range() {
        let snapshot = base_snapshot(
            vec![unit(2, "apc", false, 1, Position::new(500.0, 500.0))],
            vec![capturable(Position::new(500.0, 500.0))],
        );
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert_eq!(next_capture_step(&env), CaptureStep::Unload { apc_id: 2 });
    }

    #[test]
    fn captures_when_engineer_already_in_range() {
        let snapshot = base_snapshot(
            vec![unit(1, "e6", false, 0, Position::new(500.0, 500.0))],
            vec![capturable(Position::new(500.0, 500.0))],
        );
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert_eq!(
            next_capture_step(&env),
            CaptureStep::Capture {
                engineer_id: 1,
                target_id: 1
            }
        );
    }

    #[test]
    fn falls_back_to_on_foot_without_apc() {
        let snapshot = base_snapshot(
            vec![unit(1, "e6", true, 0, Position::new(0.0, 0.0))],
            vec![capturable(Position::new(500.0, 500.0))],
        );
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert_eq!(
            next_capture_step(&env),
            CaptureStep::WalkOnFoot {
                engineer_id: 1,
                target: Position::new(500.0, 500.0)
            }
        );
    }
}
