//! Process-wide engine memory: the heterogeneous state that survives
//! across ticks and across rule-set swaps (except where a swap explicitly
//! clears it). Modeled as a struct of named, typed fields rather than an
//! untyped map, per spec.md §9's design note.
//!
//! Callers are expected to hold the engine's single mutex for the duration
//! of any access; the methods here take `&mut self`/`&self` and assume
//! that lock is already held.

use std::collections::HashMap;

use crate::types::ActorId;

/// Persistent intel about a remembered enemy base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBaseIntel {
    pub owner_index: u32,
    pub x: f64,
    pub y: f64,
    pub tick: u64,
    /// True when this entry came from a sighted building (high confidence).
    /// Unit-only sightings only ever seed an entry that doesn't exist yet;
    /// they never overwrite a building-sourced entry.
    pub from_buildings: bool,
}

/// Which movement domain a squad operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Ground,
    Air,
    Naval,
}

/// Which role a squad was formed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquadRole {
    Attack,
    Defend,
    Scout,
}

/// A persistent named roster of unit ids.
#[derive(Debug, Clone)]
pub struct Squad {
    pub name: String,
    pub domain: Domain,
    pub members: Vec<ActorId>,
    pub target_size: u32,
    pub role: SquadRole,
}

impl Squad {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ready_ratio(&self) -> f64 {
        if self.target_size == 0 {
            return 1.0;
        }
        (self.members.len() as f64 / self.target_size as f64).min(1.0)
    }
}

/// Radial hunt-sweep state for a squad sweeping a remembered enemy base.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuntState {
    pub base_x: f64,
    pub base_y: f64,
    pub step: u32,
}

/// The complete set of engine memory fields (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct EngineMemory {
    /// Last tick an MCV-deploy command was sent, keyed by the MCV's actor id
    /// (the cooldown is per-unit, since a player may have more than one MCV).
    pub deploy_mcv_tick: HashMap<ActorId, u64>,
    /// Round-robin index into the 9-point search pattern for dedicated scouts.
    pub scout_waypoint_idx: u32,
    /// Round-robin index into the 9-point search pattern for general/ranger scouts.
    pub ranger_scout_idx: u32,
    /// Owner name -> remembered base intel.
    pub enemy_bases: HashMap<String, EnemyBaseIntel>,
    /// Role name -> ever owned (monotonic once true).
    pub built_roles: HashMap<String, bool>,
    /// Squad name -> roster.
    pub squads: HashMap<String, Squad>,
    /// Unit ids currently retreating; excluded from combat targeting.
    pub retreating_units: HashMap<ActorId, bool>,
    /// Squad name -> hunt-sweep state.
    pub hunt_base: HashMap<String, HuntState>,
    /// Support-power key -> launch count, for strategist summaries.
    pub superweapon_fires: HashMap<String, u32>,
    /// Tick counter bookkeeping for the "no rule fired" diagnostic.
    pub last_rule_fired_tick: u64,
    pub last_idle_diagnostic_tick: u64,
}

impl EngineMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the role has ever been owned (used for "lost role" / rebuild detection).
    pub fn has_ever_built(&self, role: &str) -> bool {
        self.built_roles.get(role).copied().unwrap_or(false)
    }

    /// Mark a role as having been owned at least once. Monotonic: never unset.
    pub fn mark_built(&mut self, role: &str) {
        self.built_roles.insert(role.to_string(), true);
    }

    /// Clear all squad rosters and their auxiliary hunt-state keys, as done
    /// on a successful rule-set `Swap` (a new doctrine may use different
    /// squad names/sizes).
    pub fn clear_squads(&mut self) {
        self.squads.clear();
        self.hunt_base.clear();
    }

    /// Drop a dissolved squad's roster and auxiliary memory in one place,
    /// so `huntBase:<name>`-equivalent keys never outlive their squad.
    pub fn dissolve_squad(&mut self, name: &str) {
        self.squads.remove(name);
        self.hunt_base.remove(name);
    }

    /// Record or refresh intel for `owner`. A building sighting always
    /// overwrites; a unit-only sighting only seeds an entry that doesn't
    /// already exist.
    pub fn update_intel(&mut self, owner: &str, x: f64, y: f64, tick: u64, from_building: bool) {
        if from_building {
            self.enemy_bases.insert(
                owner.to_string(),
                EnemyBaseIntel {
                    owner_index: 0,
                    x,
                    y,
                    tick,
                    from_buildings: true,
                },
            );
        } else {
            self.enemy_bases.entry(owner.to_string()).or_insert(EnemyBaseIntel {
                owner_index: 0,
                x,
                y,
                tick,
                from_buildings: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_intel_never_overwrites_building_intel() {
        let mut mem = EngineMemory::new();
        mem.update_intel("enemy", 10.0, 10.0, 1, true);
        mem.update_intel("enemy", 999.0, 999.0, 2, false);
        let intel = mem.enemy_bases.get("enemy").unwrap();
        assert!(intel.from_buildings);
        assert_eq!(intel.x, 10.0);
    }

    #[test]
    fn building_intel_overwrites_prior_entry() {
        let mut mem = EngineMemory::new();
        mem.update_intel("enemy", 1.0, 1.0, 1, false);
        mem.update_intel("enemy", 2.0, 2.0, 5, true);
        let intel = mem.enemy_bases.get("enemy").unwrap();
        assert!(intel.from_buildings);
        assert_eq!(intel.x, 2.0);
    }

    #[test]
    fn dissolve_squad_removes_hunt_state() {
        let mut mem = EngineMemory::new();
        mem.hunt_base.insert("alpha".to_string(), HuntState::default());
        mem.squads.insert(
            "alpha".to_string(),
            Squad {
                name: "alpha".to_string(),
                domain: Domain::Ground,
                members: vec![],
                target_size: 6,
                role: SquadRole::Attack,
            },
        );
        mem.dissolve_squad("alpha");
        assert!(!mem.squads.contains_key("alpha"));
        assert!(!mem.hunt_base.contains_key("alpha"));
    }

    #[test]
    fn built_roles_is_monotonic() {
        let mut mem = EngineMemory::new();
        assert!(!mem.has_ever_built("barracks"));
        mem.mark_built("barracks");
        assert!(mem.has_ever_built("barracks"));
    }
}
