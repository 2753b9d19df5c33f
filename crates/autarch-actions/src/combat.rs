//! Squad-based combat actions: formation, engagement, home-defense scrambles,
//! disengagement, and focus fire. Squads are named rosters tracked in engine
//! memory; these actions are the only things that ever add to, engage, or
//! dissolve a roster.

use std::sync::Arc;

use autarch_core::constants::SQUAD_DISENGAGE_THREAT_RATIO;
use autarch_core::memory::{Domain, Squad, SquadRole};
use autarch_core::types::Position;
use autarch_core::wire::OutboundCommand;
use autarch_rules::{ActionContext, ActionError, CompiledAction};

/// Pull unassigned idle units of `domain` into `squad_name`, creating the
/// roster on first call, up to `target_size`. A no-op precondition failure
/// once the roster is already full.
pub fn form_squad(squad_name: &'static str, domain: Domain, target_size: u32, role: SquadRole) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let current_size = ctx.memory.squads.get(squad_name).map(|s| s.members.len()).unwrap_or(0) as u32;
        if current_size >= target_size {
            return Err(ActionError::PreconditionFailed(format!("squad {squad_name} already full")));
        }
        let slots = (target_size - current_size) as usize;

        let recruits: Vec<u32> = {
            let env = ctx.environment();
            let pool = match domain {
                Domain::Ground => env.unassigned_idle_ground(),
                Domain::Air => env.unassigned_idle_air(),
                Domain::Naval => env.unassigned_idle_naval(),
            };
            pool.into_iter().take(slots).map(|u| u.id).collect()
        };
        if recruits.is_empty() {
            return Err(ActionError::PreconditionFailed(format!("no spare {domain:?} units for {squad_name}")));
        }

        ctx.memory
            .squads
            .entry(squad_name.to_string())
            .and_modify(|s| s.members.extend(&recruits))
            .or_insert_with(|| Squad {
                name: squad_name.to_string(),
                domain,
                members: recruits.clone(),
                target_size,
                role,
            });

        let commands = recruits
            .iter()
            .map(|&id| {
                let rally = ctx.snapshot.buildings.first().map(|b| b.position).unwrap_or_default();
                OutboundCommand::SetRally {
                    actor_id: id,
                    x: rally.x,
                    y: rally.y,
                }
            })
            .collect();
        Ok(commands)
    })
}

/// Send a ready squad to attack-move on the best ground target, or the
/// remembered enemy base if nothing is currently visible.
pub fn engage_squad(squad_name: &'static str) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let members: Vec<u32> = ctx
            .memory
            .squads
            .get(squad_name)
            .map(|s| s.members.clone())
            .ok_or_else(|| ActionError::PreconditionFailed(format!("squad {squad_name} does not exist")))?;
        if members.is_empty() {
            return Err(ActionError::PreconditionFailed(format!("squad {squad_name} is empty")));
        }

        let target = {
            let env = ctx.environment();
            env.best_ground_target()
                .map(|e| e.position)
                .or_else(|| env.nearest_enemy_base())
        }
        .ok_or_else(|| ActionError::NoTarget("no target to engage".to_string()))?;

        Ok(vec![OutboundCommand::AttackMove {
            actor_ids: members,
            x: target.x,
            y: target.y,
        }])
    })
}

/// Pull every idle unit in the named domain's generic pool into a scramble
/// defense at the nearest threatened building, bypassing squad membership
/// entirely (this is a one-shot reaction, not a standing roster).
pub fn scramble_defense(domain: Domain) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let (defenders, rally): (Vec<u32>, Position) = {
            let env = ctx.environment();
            if !env.base_under_attack() {
                return Err(ActionError::PreconditionFailed("base not under attack".to_string()));
            }
            let pool = match domain {
                Domain::Ground => env.unassigned_idle_ground(),
                Domain::Air => env.unassigned_idle_air(),
                Domain::Naval => env.unassigned_idle_naval(),
            };
            let defenders: Vec<u32> = pool.into_iter().map(|u| u.id).collect();

            let threatened = ctx
                .snapshot
                .buildings
                .iter()
                .min_by(|a, b| {
                    let a_dist = ctx
                        .snapshot
                        .enemies
                        .iter()
                        .map(|e| e.position.distance_to(&a.position))
                        .fold(f64::INFINITY, f64::min);
                    let b_dist = ctx
                        .snapshot
                        .enemies
                        .iter()
                        .map(|e| e.position.distance_to(&b.position))
                        .fold(f64::INFINITY, f64::min);
                    a_dist.total_cmp(&b_dist)
                })
                .map(|b| b.position)
                .unwrap_or_default();
            (defenders, threatened)
        };

        if defenders.is_empty() {
            return Err(ActionError::PreconditionFailed(format!("no spare {domain:?} defenders")));
        }
        Ok(vec![OutboundCommand::AttackMove {
            actor_ids: defenders,
            x: rally.x,
            y: rally.y,
        }])
    })
}

/// Pull a squad back to base once local enemy strength exceeds
/// `SQUAD_DISENGAGE_THREAT_RATIO` times its own, clearing its roster so it
/// can be reformed fresh rather than limping home half-strength.
pub fn disengage_squad(squad_name: &'static str, sense_radius: f64) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let threat_ratio = {
            let env = ctx.environment();
            env.squad_threat_ratio(squad_name, sense_radius)
        };
        if threat_ratio < SQUAD_DISENGAGE_THREAT_RATIO {
            return Err(ActionError::PreconditionFailed(format!("squad {squad_name} not overmatched")));
        }

        let members = ctx
            .memory
            .squads
            .get(squad_name)
            .map(|s| s.members.clone())
            .ok_or_else(|| ActionError::PreconditionFailed(format!("squad {squad_name} does not exist")))?;
        let rally = ctx.snapshot.buildings.first().map(|b| b.position).unwrap_or_default();

        let commands = members
            .iter()
            .map(|&id| OutboundCommand::Move {
                actor_id: id,
                x: rally.x,
                y: rally.y,
            })
            .collect();
        ctx.memory.dissolve_squad(squad_name);
        Ok(commands)
    })
}

/// Direct every idle combat unit to attack the lowest-HP visible enemy,
/// concentrating fire rather than letting each unit pick its own nearest
/// target.
pub fn focus_fire_weakest() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let weakest_id = ctx
            .snapshot
            .enemies
            .iter()
            .filter(|e| !e.is_building)
            .min_by(|a, b| a.hp.total_cmp(&b.hp))
            .map(|e| e.id)
            .ok_or_else(|| ActionError::NoTarget("no enemy unit to focus fire".to_string()))?;

        let attackers: Vec<u32> = {
            let env = ctx.environment();
            env.idle_ground_units().into_iter().map(|u| u.id).collect()
        };
        if attackers.is_empty() {
            return Err(ActionError::PreconditionFailed("no idle units to focus fire".to_string()));
        }

        Ok(attackers
            .into_iter()
            .map(|id| OutboundCommand::Attack {
                actor_id: id,
                target_id: weakest_id,
            })
            .collect())
    })
}
