//! Typed events produced by the detector, one variant per spec.md §4.4 kind.
//! Mirrors the teacher's `GameEvent` enum-of-structs shape
//! (`events::game_events::GameEvent`): each payload carries its own `tick`
//! so a consumer never has to thread tick state through separately.

use serde::{Deserialize, Serialize};

use crate::phase::GamePhase;
use crate::CounterDomain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalBuildingLostEvent {
    /// Every critical building lost this tick, as (actor id, type code).
    pub lost: Vec<(u32, String)>,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmyDevastatedEvent {
    pub prev_count: u32,
    pub lost_count: u32,
    pub loss_fraction: f64,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBaseDiscoveredEvent {
    pub owner: String,
    pub x: f64,
    pub y: f64,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransitionEvent {
    pub from: GamePhase,
    pub to: GamePhase,
    pub tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomyCrisisKind {
    HarvestersWiped,
    CashCollapsed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyCrisisEvent {
    pub kind: EconomyCrisisKind,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperweaponReadyEvent {
    pub power_key: String,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstContactEvent {
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCounteredEvent {
    pub domain: CounterDomain,
    pub losses_in_window: u32,
    pub tick: u64,
}

/// Every event kind the detector can emit (spec.md §4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CriticalBuildingLost(CriticalBuildingLostEvent),
    ArmyDevastated(ArmyDevastatedEvent),
    EnemyBaseDiscovered(EnemyBaseDiscoveredEvent),
    PhaseTransition(PhaseTransitionEvent),
    EconomyCrisis(EconomyCrisisEvent),
    SuperweaponReady(SuperweaponReadyEvent),
    FirstContact(FirstContactEvent),
    StrategyCountered(StrategyCounteredEvent),
}

impl GameEvent {
    /// True for event kinds that should wake the strategist early rather
    /// than wait for its normal re-evaluation interval (spec.md §4.5).
    pub fn is_urgent(&self) -> bool {
        matches!(
            self,
            GameEvent::CriticalBuildingLost(_)
                | GameEvent::ArmyDevastated(_)
                | GameEvent::EconomyCrisis(_)
                | GameEvent::StrategyCountered(_)
        )
    }
}
