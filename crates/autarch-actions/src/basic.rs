//! Generic, role-driven action factories. Most of the doctrine compiler's
//! emitted blocks (spec.md §4.3) are built from these rather than one
//! bespoke closure per unit or building type: the role registry is data,
//! so "build a barracks" and "build a war factory" are the same factory
//! called with a different role name.

use std::sync::Arc;

use autarch_core::constants::MCV_DEPLOY_COOLDOWN_TICKS;
use autarch_core::role::code_matches;
use autarch_core::wire::OutboundCommand;
use autarch_rules::{ActionContext, ActionError, CompiledAction};

use crate::placement::placement_hint;

/// Deploy the first MCV not currently on cooldown.
pub fn deploy_mcv() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let mcv = ctx
            .snapshot
            .units
            .iter()
            .find(|u| code_matches(&u.type_code, "mcv"))
            .ok_or_else(|| ActionError::NoTarget("no MCV present".to_string()))?;

        let last = ctx.memory.deploy_mcv_tick.get(&mcv.id).copied().unwrap_or(0);
        if ctx.tick.saturating_sub(last) < MCV_DEPLOY_COOLDOWN_TICKS {
            return Err(ActionError::PreconditionFailed("MCV deploy on cooldown".to_string()));
        }

        ctx.memory.deploy_mcv_tick.insert(mcv.id, ctx.tick);
        Ok(vec![OutboundCommand::Deploy { actor_id: mcv.id }])
    })
}

/// Queue one of `role` in its production queue, up to `cap` concurrently
/// queued/owned. `cap` is pre-computed by the doctrine compiler from the
/// doctrine weight, including the cash-savings gate baked into the
/// condition this action is paired with.
pub fn produce_role(role: &'static str, count: u32) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let env = ctx.environment();
        let def = env
            .roles
            .get(role)
            .ok_or_else(|| ActionError::NoTarget(format!("role {role} not registered")))?;
        let queue_name = def.queue.clone();
        let item = env
            .buildable_type(role)
            .ok_or_else(|| ActionError::NoTarget(format!("no buildable type for role {role}")))?
            .to_string();

        Ok(vec![OutboundCommand::Produce {
            queue: queue_name,
            item,
            count,
        }])
    })
}

/// Place the first ready item in `queue`. Defensive roles get a scored
/// placement hint; everything else is placed without a hint, letting the
/// game host pick a spot adjacent to the base.
pub fn place_ready_building(queue: &'static str, scored_hint: bool) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let ready_item = ctx
            .snapshot
            .queue(queue)
            .filter(|q| q.ready())
            .and_then(|q| q.current_item.clone())
            .ok_or_else(|| ActionError::PreconditionFailed(format!("{queue} queue not ready")))?;

        let (hint_x, hint_y) = if scored_hint {
            // Built inline (rather than via `ctx.environment()`) so the
            // environment's borrow of `ctx.memory` stays disjoint from the
            // `ctx.rng` borrow needed in the same call.
            let env = autarch_env::Environment::new(ctx.snapshot, ctx.memory, ctx.roles, ctx.faction);
            match placement_hint(&env, ctx.rng) {
                Some(pos) => (Some(pos.x), Some(pos.y)),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        Ok(vec![OutboundCommand::PlaceBuilding {
            queue: queue.to_string(),
            item: ready_item,
            hint_x,
            hint_y,
        }])
    })
}

/// Repair every damaged owned building, one command per building (a
/// bounded broadcast action per spec.md §4.6's contract).
pub fn repair_damaged_buildings() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let env = ctx.environment();
        let commands: Vec<OutboundCommand> = env
            .damaged_buildings()
            .into_iter()
            .map(|b| OutboundCommand::RepairBuilding { actor_id: b.id })
            .collect();
        if commands.is_empty() {
            return Err(ActionError::PreconditionFailed("no damaged buildings".to_string()));
        }
        Ok(commands)
    })
}

/// Send every idle harvester back to the nearest owned refinery so the
/// game host resumes automatic ore collection.
pub fn return_idle_harvesters() -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let refinery = ctx
            .snapshot
            .buildings
            .iter()
            .find(|b| code_matches(&b.type_code, "proc"))
            .or_else(|| ctx.snapshot.buildings.first())
            .ok_or_else(|| ActionError::NoTarget("no refinery or building to return to".to_string()))?;
        let target = refinery.position;

        let commands: Vec<OutboundCommand> = ctx
            .snapshot
            .units
            .iter()
            .filter(|u| u.idle && code_matches(&u.type_code, "harv"))
            .map(|u| OutboundCommand::Harvest {
                actor_id: u.id,
                x: target.x,
                y: target.y,
            })
            .collect();

        if commands.is_empty() {
            return Err(ActionError::PreconditionFailed("no idle harvesters".to_string()));
        }
        Ok(commands)
    })
}

/// Cancel production on `queue` when the current item has been sitting
/// ready with nowhere to place it (no buildable slot left this tick). Used
/// for the "cancel stuck aircraft" core rule and similar.
pub fn cancel_stuck_production(queue: &'static str) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let q = ctx
            .snapshot
            .queue(queue)
            .filter(|q| q.ready())
            .ok_or_else(|| ActionError::PreconditionFailed(format!("{queue} not stuck")))?;
        let item = q
            .current_item
            .clone()
            .ok_or_else(|| ActionError::PreconditionFailed("no current item".to_string()))?;
        Ok(vec![OutboundCommand::CancelProduction {
            queue: queue.to_string(),
            item,
            count: 1,
        }])
    })
}

/// Fire a support power at its own base centroid, or at the nearest enemy
/// when one is visible, depending on `target_enemy`.
pub fn fire_support_power(power_key: &'static str, target_enemy: bool) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let env = ctx.environment();
        let power = ctx
            .snapshot
            .support_powers
            .iter()
            .find(|p| p.key == power_key && p.ready)
            .ok_or_else(|| ActionError::PreconditionFailed(format!("{power_key} not ready")))?;

        let target = if target_enemy {
            env.best_ground_target()
                .map(|e| e.position)
                .ok_or_else(|| ActionError::NoTarget("no visible enemy".to_string()))?
        } else {
            ctx.snapshot
                .buildings
                .first()
                .map(|b| b.position)
                .ok_or_else(|| ActionError::NoTarget("no owned building to center on".to_string()))?
        };

        *ctx.memory.superweapon_fires.entry(power.key.clone()).or_insert(0) += 1;

        Ok(vec![OutboundCommand::SupportPower {
            power_key: power_key.to_string(),
            x: target.x,
            y: target.y,
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::EngineMemory;
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, OwnedUnit, ProductionQueue, Snapshot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot_with_mcv(id: u32) -> Snapshot {
        Snapshot {
            tick: 10,
            economy: Economy::default(),
            units: vec![OwnedUnit {
                id,
                type_code: "mcv".to_string(),
                position: Default::default(),
                hp: 100.0,
                max_hp: 100.0,
                idle: true,
                cargo: 0,
            }],
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 100.0,
                height: 100.0,
            },
            terrain: None,
        }
    }

    #[test]
    fn deploy_mcv_respects_cooldown() {
        let snapshot = snapshot_with_mcv(5);
        let mut memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let action = deploy_mcv();

        {
            let mut ctx = ActionContext {
                snapshot: &snapshot,
                roles: &roles,
                faction: "soviet",
                memory: &mut memory,
                rng: &mut rng,
                tick: 10,
            };
            let result = action(&mut ctx).unwrap();
            assert_eq!(result, vec![OutboundCommand::Deploy { actor_id: 5 }]);
        }

        let mut later = snapshot.clone();
        later.tick = 15;
        let mut ctx = ActionContext {
            snapshot: &later,
            roles: &roles,
            faction: "soviet",
            memory: &mut memory,
            rng: &mut rng,
            tick: 15,
        };
        assert!(action(&mut ctx).is_err());
    }
}
