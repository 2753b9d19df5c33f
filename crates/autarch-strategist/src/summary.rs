//! Snapshot summarization: the compact view sent to the LLM adapter in
//! place of the full per-tick snapshot. Keeps the request payload small
//! and keeps the LLM from ever seeing raw actor ids or positions.

use std::collections::HashMap;

use autarch_core::snapshot::Snapshot;
use autarch_events::{GameEvent, GamePhase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomySummary {
    pub cash: f64,
    pub ore_stored: f64,
    pub power_excess: f64,
    pub resources_near_cap: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionQueueSummary {
    pub queue: String,
    pub busy: bool,
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelSummary {
    pub enemies_visible: u32,
    pub known_enemy_bases: u32,
}

/// The compact view of game state an LLM advisor reasons over: a phase
/// label, rollups of economy/unit/building/production/intel state,
/// readiness of each support power, and the events since the last request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub tick: u64,
    pub phase: Option<GamePhase>,
    pub economy: EconomySummary,
    pub unit_count: u32,
    pub building_count: u32,
    pub production: Vec<ProductionQueueSummary>,
    pub intel: IntelSummary,
    pub support_powers_ready: Vec<String>,
    pub recent_events: Vec<GameEvent>,
}

/// Build a [`StrategySummary`] from the latest snapshot plus the events
/// accumulated since the previous strategist request.
pub fn summarize(snapshot: &Snapshot, phase: GamePhase, recent_events: Vec<GameEvent>) -> StrategySummary {
    let production = snapshot
        .production
        .iter()
        .map(|q| ProductionQueueSummary {
            queue: q.queue.clone(),
            busy: q.busy(),
            ready: q.ready(),
        })
        .collect();

    let mut known_bases: HashMap<&str, ()> = HashMap::new();
    for enemy in &snapshot.enemies {
        if enemy.is_building {
            known_bases.insert(enemy.owner.as_str(), ());
        }
    }

    let support_powers_ready = snapshot
        .support_powers
        .iter()
        .filter(|p| p.ready)
        .map(|p| p.key.clone())
        .collect();

    StrategySummary {
        tick: snapshot.tick,
        phase: Some(phase),
        economy: EconomySummary {
            cash: snapshot.economy.cash,
            ore_stored: snapshot.economy.ore_stored,
            power_excess: snapshot.economy.power_excess(),
            resources_near_cap: snapshot.economy.resources_near_cap(),
        },
        unit_count: snapshot.units.len() as u32,
        building_count: snapshot.buildings.len() as u32,
        production,
        intel: IntelSummary {
            enemies_visible: snapshot.enemies.len() as u32,
            known_enemy_bases: known_bases.len() as u32,
        },
        support_powers_ready,
        recent_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::snapshot::{Economy, EnemyUnit, MapDims, ProductionQueue};
    use autarch_core::types::Position;

    fn snapshot() -> Snapshot {
        Snapshot {
            tick: 42,
            economy: Economy {
                cash: 500.0,
                ore_stored: 100.0,
                ore_capacity: 1000.0,
                power_provided: 100.0,
                power_drained: 40.0,
                ..Economy::default()
            },
            units: vec![],
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![
                EnemyUnit {
                    id: 1,
                    owner: "allied".to_string(),
                    type_code: "fact".to_string(),
                    position: Position::default(),
                    hp: 100.0,
                    max_hp: 100.0,
                    is_building: true,
                },
                EnemyUnit {
                    id: 2,
                    owner: "allied".to_string(),
                    type_code: "e1".to_string(),
                    position: Position::default(),
                    hp: 50.0,
                    max_hp: 50.0,
                    is_building: false,
                },
            ],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 1000.0,
                height: 1000.0,
            },
            terrain: None,
        }
    }

    #[test]
    fn summarizes_intel_and_economy() {
        let summary = summarize(&snapshot(), GamePhase::Mid, vec![]);
        assert_eq!(summary.intel.enemies_visible, 2);
        assert_eq!(summary.intel.known_enemy_bases, 1);
        assert_eq!(summary.economy.power_excess, 60.0);
    }
}
