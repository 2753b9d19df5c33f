//! Snapshot-diffing event detector (spec.md §4.4). Grounded on the
//! teacher's plain-struct state-diffing idiom (`state::weather::WeatherState`
//! /`state::campaign_state::CampaignState`: keep the previous tick's derived
//! fields in an owned struct, compare field by field each tick) rather than
//! a generic diff library.

use std::collections::{HashMap, HashSet};

use autarch_core::constants::{
    ARMY_DEVASTATED_LOSS_FRACTION, ARMY_DEVASTATED_MIN_PREV_UNITS, ECONOMY_CRISIS_HIGH_WATERMARK,
    ECONOMY_CRISIS_LOW_WATERMARK, STRATEGY_COUNTERED_COOLDOWN_TICKS, STRATEGY_COUNTER_WINDOW_TICKS,
};
use autarch_core::role::code_matches;
use autarch_core::snapshot::Snapshot;
use autarch_core::types::ActorId;
use serde::{Deserialize, Serialize};

use crate::phase::{derive_phase, GamePhase};
use crate::types::{
    ArmyDevastatedEvent, CriticalBuildingLostEvent, EconomyCrisisEvent, EconomyCrisisKind,
    EnemyBaseDiscoveredEvent, FirstContactEvent, GameEvent, PhaseTransitionEvent, StrategyCounteredEvent,
    SuperweaponReadyEvent,
};

/// Building type markers treated as critical: losing any of these is worth
/// an early strategist look (construction yard, war factory, tech center,
/// refinery, superweapon support structures).
const CRITICAL_BUILDING_MARKERS: &[&str] = &["fact", "weap", "proc", "stek", "atek", "dome", "silo", "iron"];

/// Which production domain a unit loss counts against for
/// `strategy_countered` (spec.md §4.4 kind 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterDomain {
    Infantry,
    Vehicle,
    Aircraft,
}

const ALL_DOMAINS: [CounterDomain; 3] = [CounterDomain::Infantry, CounterDomain::Vehicle, CounterDomain::Aircraft];

const INFANTRY_MARKERS: &[&str] = &["e1", "e2", "e3", "e4", "e6", "e7", "spy", "thf", "medi", "shok"];
const AIRCRAFT_MARKERS: &[&str] = &["yak", "mig", "heli", "orca", "air"];

/// Enemy type markers that "counter" each domain, used as the second half
/// of the `strategy_countered` gate (losses alone aren't proof the enemy
/// adapted; a visible counter-type unit is).
const INFANTRY_COUNTER_MARKERS: &[&str] = &["ftur", "flame", "tsla"];
const VEHICLE_COUNTER_MARKERS: &[&str] = &["apoc", "4tnk", "3tnk", "rhino"];
const AIRCRAFT_COUNTER_MARKERS: &[&str] = &["sam", "agun", "mig", "yak"];

fn counter_domain_of(type_code: &str) -> CounterDomain {
    if AIRCRAFT_MARKERS.iter().any(|m| code_matches(type_code, m)) {
        CounterDomain::Aircraft
    } else if INFANTRY_MARKERS.iter().any(|m| code_matches(type_code, m)) {
        CounterDomain::Infantry
    } else {
        CounterDomain::Vehicle
    }
}

fn counter_threshold(domain: CounterDomain) -> u32 {
    match domain {
        CounterDomain::Infantry => autarch_core::constants::COUNTER_THRESHOLD_INFANTRY,
        CounterDomain::Vehicle => autarch_core::constants::COUNTER_THRESHOLD_VEHICLE,
        CounterDomain::Aircraft => autarch_core::constants::COUNTER_THRESHOLD_AIRCRAFT,
    }
}

fn counter_markers(domain: CounterDomain) -> &'static [&'static str] {
    match domain {
        CounterDomain::Infantry => INFANTRY_COUNTER_MARKERS,
        CounterDomain::Vehicle => VEHICLE_COUNTER_MARKERS,
        CounterDomain::Aircraft => AIRCRAFT_COUNTER_MARKERS,
    }
}

/// Losses accumulated toward a domain's `strategy_countered` threshold: a
/// sliding window of (tick, unit id) pairs plus the cooldown bookkeeping.
/// `union` of the ids already in the window is what makes "one per tick"
/// attrition still cross the threshold (spec.md §4.4 kind 8).
#[derive(Debug, Clone, Default)]
struct CounterWindow {
    losses: Vec<(u64, ActorId)>,
    last_fired_tick: Option<u64>,
}

impl CounterWindow {
    fn push_losses(&mut self, tick: u64, ids: impl IntoIterator<Item = ActorId>) {
        self.losses.extend(ids.into_iter().map(|id| (tick, id)));
    }

    /// Drop entries older than the sliding window, keeping the baseline
    /// tick (the oldest surviving entry) implicit in what remains.
    fn decay(&mut self, tick: u64) {
        self.losses.retain(|(t, _)| tick.saturating_sub(*t) <= STRATEGY_COUNTER_WINDOW_TICKS);
    }

    fn unique_count(&self) -> u32 {
        self.losses.iter().map(|(_, id)| *id).collect::<HashSet<_>>().len() as u32
    }

    fn cooldown_active(&self, tick: u64) -> bool {
        match self.last_fired_tick {
            Some(last) => tick.saturating_sub(last) < STRATEGY_COUNTERED_COOLDOWN_TICKS,
            None => false,
        }
    }

    fn fire(&mut self, tick: u64) {
        self.losses.clear();
        self.last_fired_tick = Some(tick);
    }
}

/// The compact previous-tick state the detector diffs against (spec.md
/// §4.4's data-model list). Holds only what's needed to detect transitions,
/// never the full snapshot.
#[derive(Debug, Clone)]
pub struct CompactSnapshot {
    building_ids_by_type: HashMap<String, HashSet<ActorId>>,
    combat_unit_count: u32,
    harvester_count: u32,
    cash_plus_resources: f64,
    economy_high_water_reached: bool,
    phase: GamePhase,
    known_base: bool,
    support_power_ready: HashSet<String>,
    domain_unit_ids: HashMap<CounterDomain, HashSet<ActorId>>,
    any_enemy_ever_seen: bool,
    last_counter_tick: u64,
}

impl CompactSnapshot {
    fn capture(snapshot: &Snapshot, known_base: bool, any_enemy_ever_seen: bool, economy_high_water_reached: bool) -> Self {
        let mut building_ids_by_type: HashMap<String, HashSet<ActorId>> = HashMap::new();
        for marker in CRITICAL_BUILDING_MARKERS {
            let ids: HashSet<ActorId> = snapshot
                .buildings
                .iter()
                .filter(|b| code_matches(&b.type_code, marker))
                .map(|b| b.id)
                .collect();
            building_ids_by_type.insert(marker.to_string(), ids);
        }

        let mut domain_unit_ids: HashMap<CounterDomain, HashSet<ActorId>> = HashMap::new();
        for domain in ALL_DOMAINS {
            domain_unit_ids.insert(domain, HashSet::new());
        }
        for unit in &snapshot.units {
            if code_matches(&unit.type_code, "harv") || code_matches(&unit.type_code, "mcv") {
                continue;
            }
            domain_unit_ids
                .entry(counter_domain_of(&unit.type_code))
                .or_default()
                .insert(unit.id);
        }

        let combat_unit_count = snapshot
            .units
            .iter()
            .filter(|u| !code_matches(&u.type_code, "harv") && !code_matches(&u.type_code, "mcv"))
            .count() as u32;
        let harvester_count = snapshot.units.iter().filter(|u| code_matches(&u.type_code, "harv")).count() as u32;

        Self {
            building_ids_by_type,
            combat_unit_count,
            harvester_count,
            cash_plus_resources: snapshot.economy.total_cash(),
            economy_high_water_reached,
            phase: derive_phase(snapshot),
            known_base,
            support_power_ready: snapshot
                .support_powers
                .iter()
                .filter(|p| p.ready)
                .map(|p| p.key.clone())
                .collect(),
            domain_unit_ids,
            any_enemy_ever_seen,
            last_counter_tick: snapshot.tick,
        }
    }
}

/// Diffs consecutive snapshots into typed events, holding the state
/// described in spec.md §4.4 across calls. One instance per connection.
#[derive(Debug, Clone, Default)]
pub struct EventDetector {
    prev: Option<CompactSnapshot>,
    counters: HashMap<CounterDomain, CounterWindow>,
}

impl EventDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `snapshot` against the previously seen one and return every
    /// event kind that fired this tick. With no previous snapshot (first
    /// call), returns empty (spec.md §8 boundary behavior).
    pub fn detect(&mut self, snapshot: &Snapshot) -> Vec<GameEvent> {
        let Some(prev) = self.prev.clone() else {
            let known_base = snapshot.enemies.iter().any(|e| e.is_building);
            let any_enemy_ever_seen = !snapshot.enemies.is_empty();
            let high_water = snapshot.economy.total_cash() > ECONOMY_CRISIS_HIGH_WATERMARK;
            self.prev = Some(CompactSnapshot::capture(snapshot, known_base, any_enemy_ever_seen, high_water));
            return Vec::new();
        };

        let mut events = Vec::new();
        let tick = snapshot.tick;

        self.detect_critical_building_lost(&prev, snapshot, tick, &mut events);
        self.detect_army_devastated(&prev, snapshot, tick, &mut events);
        let known_base = self.detect_enemy_base_discovered(&prev, snapshot, tick, &mut events);
        self.detect_phase_transition(&prev, snapshot, tick, &mut events);
        let high_water = self.detect_economy_crisis(&prev, snapshot, tick, &mut events);
        self.detect_superweapon_ready(&prev, snapshot, tick, &mut events);
        let any_enemy_ever_seen = self.detect_first_contact(&prev, snapshot, tick, &mut events);
        self.detect_strategy_countered(&prev, snapshot, tick, &mut events);

        self.prev = Some(CompactSnapshot::capture(snapshot, known_base, any_enemy_ever_seen, high_water));
        events
    }

    fn detect_critical_building_lost(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) {
        let mut lost = Vec::new();
        for marker in CRITICAL_BUILDING_MARKERS {
            let Some(prev_ids) = prev.building_ids_by_type.get(*marker) else {
                continue;
            };
            for &id in prev_ids {
                if !snapshot.buildings.iter().any(|b| b.id == id) {
                    lost.push((id, (*marker).to_string()));
                }
            }
        }
        if !lost.is_empty() {
            events.push(GameEvent::CriticalBuildingLost(CriticalBuildingLostEvent { lost, tick }));
        }
    }

    fn detect_army_devastated(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) {
        if prev.combat_unit_count < ARMY_DEVASTATED_MIN_PREV_UNITS {
            return;
        }
        let current = snapshot
            .units
            .iter()
            .filter(|u| !code_matches(&u.type_code, "harv") && !code_matches(&u.type_code, "mcv"))
            .count() as u32;
        let lost = prev.combat_unit_count.saturating_sub(current);
        let fraction = lost as f64 / prev.combat_unit_count as f64;
        if fraction > ARMY_DEVASTATED_LOSS_FRACTION {
            events.push(GameEvent::ArmyDevastated(ArmyDevastatedEvent {
                prev_count: prev.combat_unit_count,
                lost_count: lost,
                loss_fraction: fraction,
                tick,
            }));
        }
    }

    fn detect_enemy_base_discovered(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) -> bool {
        if prev.known_base {
            return true;
        }
        if let Some(sighting) = snapshot.enemies.iter().find(|e| e.is_building) {
            events.push(GameEvent::EnemyBaseDiscovered(EnemyBaseDiscoveredEvent {
                owner: sighting.owner.clone(),
                x: sighting.position.x,
                y: sighting.position.y,
                tick,
            }));
            true
        } else {
            false
        }
    }

    fn detect_phase_transition(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) {
        let phase = derive_phase(snapshot);
        if phase != prev.phase {
            events.push(GameEvent::PhaseTransition(PhaseTransitionEvent {
                from: prev.phase,
                to: phase,
                tick,
            }));
        }
    }

    fn detect_economy_crisis(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) -> bool {
        let harvesters_now = snapshot.units.iter().filter(|u| code_matches(&u.type_code, "harv")).count() as u32;
        if prev.harvester_count > 0 && harvesters_now == 0 {
            events.push(GameEvent::EconomyCrisis(EconomyCrisisEvent {
                kind: EconomyCrisisKind::HarvestersWiped,
                tick,
            }));
        }

        let total = snapshot.economy.total_cash();
        let high_water_reached = prev.economy_high_water_reached || total > ECONOMY_CRISIS_HIGH_WATERMARK;
        if prev.economy_high_water_reached && total < ECONOMY_CRISIS_LOW_WATERMARK {
            events.push(GameEvent::EconomyCrisis(EconomyCrisisEvent {
                kind: EconomyCrisisKind::CashCollapsed,
                tick,
            }));
            // Require climbing back above the high watermark before this
            // can fire again, rather than re-firing every tick cash stays low.
            return false;
        }
        high_water_reached
    }

    fn detect_superweapon_ready(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) {
        for power in &snapshot.support_powers {
            if power.ready && !prev.support_power_ready.contains(&power.key) {
                events.push(GameEvent::SuperweaponReady(SuperweaponReadyEvent {
                    power_key: power.key.clone(),
                    tick,
                }));
            }
        }
    }

    fn detect_first_contact(&self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) -> bool {
        if prev.any_enemy_ever_seen {
            return true;
        }
        if !snapshot.enemies.is_empty() {
            events.push(GameEvent::FirstContact(FirstContactEvent { tick }));
            true
        } else {
            false
        }
    }

    fn detect_strategy_countered(&mut self, prev: &CompactSnapshot, snapshot: &Snapshot, tick: u64, events: &mut Vec<GameEvent>) {
        for domain in ALL_DOMAINS {
            let prev_ids = prev.domain_unit_ids.get(&domain).cloned().unwrap_or_default();
            let current_ids: HashSet<ActorId> = snapshot
                .units
                .iter()
                .filter(|u| {
                    !code_matches(&u.type_code, "harv")
                        && !code_matches(&u.type_code, "mcv")
                        && counter_domain_of(&u.type_code) == domain
                })
                .map(|u| u.id)
                .collect();
            let lost_ids: Vec<ActorId> = prev_ids.difference(&current_ids).copied().collect();

            let window = self.counters.entry(domain).or_default();
            window.decay(tick);
            if !lost_ids.is_empty() {
                window.push_losses(tick, lost_ids);
            }

            let counter_visible = snapshot
                .enemies
                .iter()
                .any(|e| counter_markers(domain).iter().any(|m| code_matches(&e.type_code, m)));

            if window.unique_count() >= counter_threshold(domain) && counter_visible && !window.cooldown_active(tick) {
                let losses_in_window = window.unique_count();
                window.fire(tick);
                events.push(GameEvent::StrategyCountered(StrategyCounteredEvent {
                    domain,
                    losses_in_window,
                    tick,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::snapshot::{Economy, EnemyUnit, MapDims, OwnedBuilding, OwnedUnit, ProductionQueue};
    use autarch_core::types::Position;

    fn base_snapshot(tick: u64) -> Snapshot {
        Snapshot {
            tick,
            economy: Economy::default(),
            units: vec![],
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
        }
    }

    fn infantry(id: u32) -> OwnedUnit {
        OwnedUnit {
            id,
            type_code: "e1".to_string(),
            position: Position::default(),
            hp: 50.0,
            max_hp: 50.0,
            idle: false,
            cargo: 0,
        }
    }

    #[test]
    fn first_call_with_no_prior_snapshot_returns_empty() {
        let mut detector = EventDetector::new();
        assert!(detector.detect(&base_snapshot(1)).is_empty());
    }

    #[test]
    fn critical_building_lost_fires_once_with_all_losses() {
        let mut detector = EventDetector::new();
        let mut first = base_snapshot(1);
        first.buildings = vec![
            OwnedBuilding {
                id: 1,
                type_code: "fact".to_string(),
                position: Position::default(),
                hp: 1000.0,
                max_hp: 1000.0,
            },
            OwnedBuilding {
                id: 2,
                type_code: "weap".to_string(),
                position: Position::default(),
                hp: 1000.0,
                max_hp: 1000.0,
            },
        ];
        detector.detect(&first);

        let second = base_snapshot(2);
        let events = detector.detect(&second);
        assert_eq!(events.len(), 1);
        match &events[0] {
            GameEvent::CriticalBuildingLost(e) => assert_eq!(e.lost.len(), 2),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn army_devastated_requires_minimum_and_majority_loss() {
        let mut detector = EventDetector::new();
        let mut first = base_snapshot(1);
        first.units = (0..8).map(infantry).collect();
        detector.detect(&first);

        let mut second = base_snapshot(2);
        second.units = (0..3).map(infantry).collect();
        let events = detector.detect(&second);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::ArmyDevastated(_)));
    }

    #[test]
    fn first_contact_fires_once() {
        let mut detector = EventDetector::new();
        detector.detect(&base_snapshot(1));

        let mut with_enemy = base_snapshot(2);
        with_enemy.enemies.push(EnemyUnit {
            id: 1,
            owner: "enemy".to_string(),
            type_code: "e1".to_string(),
            position: Position::default(),
            hp: 50.0,
            max_hp: 50.0,
            is_building: false,
        });
        let events = detector.detect(&with_enemy);
        assert!(events.iter().any(|e| matches!(e, GameEvent::FirstContact(_))));

        let events_again = detector.detect(&with_enemy);
        assert!(!events_again.iter().any(|e| matches!(e, GameEvent::FirstContact(_))));
    }

    #[test]
    fn strategy_countered_accumulates_one_loss_per_tick_and_cools_down() {
        let mut detector = EventDetector::new();
        let mut snapshot = base_snapshot(0);
        snapshot.units = vec![infantry(1), infantry(2)];
        snapshot.enemies.push(EnemyUnit {
            id: 99,
            owner: "enemy".to_string(),
            type_code: "tsla".to_string(),
            position: Position::default(),
            hp: 500.0,
            max_hp: 500.0,
            is_building: true,
        });
        detector.detect(&snapshot);

        // Lose one infantry unit per tick, 40 ticks apart, with the enemy
        // tesla coil visible throughout.
        let mut tick = 40;
        snapshot.tick = tick;
        snapshot.units = vec![infantry(2)];
        let events = detector.detect(&snapshot);
        assert!(events.is_empty(), "only one loss so far, threshold is 2");

        tick += 40;
        snapshot.tick = tick;
        snapshot.units = vec![];
        let events = detector.detect(&snapshot);
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::StrategyCountered(_))).count(),
            1
        );

        // A further loss within the cooldown window produces no event.
        tick += 40;
        snapshot.tick = tick;
        snapshot.units = vec![infantry(3)];
        let events = detector.detect(&snapshot);
        snapshot.units = vec![];
        tick += 40;
        snapshot.tick = tick;
        let events2 = detector.detect(&snapshot);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::StrategyCountered(_))));
        assert!(!events2.iter().any(|e| matches!(e, GameEvent::StrategyCountered(_))));
    }
}
