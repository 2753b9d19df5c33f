//! Non-exclusive "micro" actions: retreat, recall, and harvester safety
//! (spec.md §4.3's Micro block). All fire independently of category
//! exclusivity and may co-fire with anything else in a tick.

use std::sync::Arc;

use autarch_core::constants::SQUAD_LEASH_FRACTION;
use autarch_core::types::Position;
use autarch_core::wire::OutboundCommand;
use autarch_rules::{ActionContext, ActionError, CompiledAction};

/// Distance-threshold damage ratio below which a combat unit retreats to
/// the nearest service-depot-capable building, or the base centroid if
/// none exists.
pub fn retreat_damaged_units(threshold: f64) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        // Collect the ids first so the environment's borrow of `ctx` ends
        // before `ctx.memory` needs to be mutated below.
        let damaged_ids: Vec<u32> = {
            let env = ctx.environment();
            env.damaged_combat_units(threshold).iter().map(|u| u.id).collect()
        };
        if damaged_ids.is_empty() {
            return Err(ActionError::PreconditionFailed("no damaged combat units".to_string()));
        }

        let rally = ctx
            .snapshot
            .buildings
            .iter()
            .find(|b| autarch_core::role::code_matches(&b.type_code, "fix"))
            .or_else(|| ctx.snapshot.buildings.first())
            .map(|b| b.position)
            .unwrap_or_default();

        let commands: Vec<OutboundCommand> = damaged_ids
            .iter()
            .map(|&id| {
                ctx.memory.retreating_units.insert(id, true);
                OutboundCommand::Move {
                    actor_id: id,
                    x: rally.x,
                    y: rally.y,
                }
            })
            .collect();
        Ok(commands)
    })
}

/// Drop any unit from the retreat set once its HP ratio climbs back above
/// the threshold, so it re-enters the normal idle/combat pools.
pub fn clear_healed_retreaters(threshold: f64) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let healed: Vec<u32> = ctx
            .snapshot
            .units
            .iter()
            .filter(|u| {
                ctx.memory.retreating_units.contains_key(&u.id) && u.max_hp > 0.0 && u.hp / u.max_hp >= threshold
            })
            .map(|u| u.id)
            .collect();

        if healed.is_empty() {
            return Err(ActionError::PreconditionFailed("nothing healed".to_string()));
        }
        for id in &healed {
            ctx.memory.retreating_units.remove(id);
        }
        Ok(vec![])
    })
}

/// Recall any squad member further than `SQUAD_LEASH_FRACTION` of the map
/// diagonal from the squad's centroid, pulling it back toward the group.
pub fn recall_overextended(squad_name: &'static str) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let squad = ctx
            .memory
            .squads
            .get(squad_name)
            .ok_or_else(|| ActionError::PreconditionFailed(format!("squad {squad_name} does not exist")))?;

        let members: Vec<(u32, Position)> = ctx
            .snapshot
            .units
            .iter()
            .filter(|u| squad.members.contains(&u.id))
            .map(|u| (u.id, u.position))
            .collect();

        if members.is_empty() {
            return Err(ActionError::PreconditionFailed("squad has no members".to_string()));
        }

        let cx = members.iter().map(|(_, p)| p.x).sum::<f64>() / members.len() as f64;
        let cy = members.iter().map(|(_, p)| p.y).sum::<f64>() / members.len() as f64;
        let centroid = Position::new(cx, cy);
        let leash = ctx.snapshot.map.diagonal() * SQUAD_LEASH_FRACTION;

        let commands: Vec<OutboundCommand> = members
            .iter()
            .filter(|(_, pos)| pos.distance_to(&centroid) > leash)
            .map(|(id, _)| OutboundCommand::Move {
                actor_id: *id,
                x: centroid.x,
                y: centroid.y,
            })
            .collect();

        if commands.is_empty() {
            return Err(ActionError::PreconditionFailed("no overextended members".to_string()));
        }
        Ok(commands)
    })
}

/// Move idle harvesters away from any enemy within their own detection
/// radius, back toward the base centroid. Weighted by economy preference
/// at the doctrine-compiler level (a higher economy weight lowers the
/// trigger radius the compiler bakes into the paired condition).
pub fn flee_harvesters(danger_radius: f64) -> CompiledAction {
    Arc::new(move |ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
        let base = ctx
            .snapshot
            .buildings
            .first()
            .map(|b| b.position)
            .ok_or_else(|| ActionError::NoTarget("no base to flee toward".to_string()))?;

        let commands: Vec<OutboundCommand> = ctx
            .snapshot
            .units
            .iter()
            .filter(|u| autarch_core::role::code_matches(&u.type_code, "harv"))
            .filter(|u| {
                ctx.snapshot
                    .enemies
                    .iter()
                    .any(|e| e.position.distance_to(&u.position) <= danger_radius)
            })
            .map(|u| OutboundCommand::Move {
                actor_id: u.id,
                x: base.x,
                y: base.y,
            })
            .collect();

        if commands.is_empty() {
            return Err(ActionError::PreconditionFailed("no harvesters in danger".to_string()));
        }
        Ok(commands)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::memory::{Domain, EngineMemory, Squad, SquadRole};
    use autarch_core::role::RoleRegistry;
    use autarch_core::snapshot::{Economy, MapDims, OwnedUnit, ProductionQueue, Snapshot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn unit(id: u32, pos: Position) -> OwnedUnit {
        OwnedUnit {
            id,
            type_code: "e1".to_string(),
            position: pos,
            hp: 100.0,
            max_hp: 100.0,
            idle: false,
            cargo: 0,
        }
    }

    #[test]
    fn recall_overextended_pulls_in_far_member() {
        let snapshot = Snapshot {
            tick: 1,
            economy: Economy::default(),
            units: vec![unit(1, Position::new(0.0, 0.0)), unit(2, Position::new(5000.0, 5000.0))],
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 1000.0,
                height: 1000.0,
            },
            terrain: None,
        };
        let mut memory = EngineMemory::new();
        memory.squads.insert(
            "alpha".to_string(),
            Squad {
                name: "alpha".to_string(),
                domain: Domain::Ground,
                members: vec![1, 2],
                target_size: 2,
                role: SquadRole::Attack,
            },
        );
        let roles = RoleRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let action = recall_overextended("alpha");
        let mut ctx = ActionContext {
            snapshot: &snapshot,
            roles: &roles,
            faction: "soviet",
            memory: &mut memory,
            rng: &mut rng,
            tick: 1,
        };
        let commands = action(&mut ctx).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0],
            OutboundCommand::Move {
                actor_id: 2,
                x: 2500.0,
                y: 2500.0
            }
        );
    }
}
