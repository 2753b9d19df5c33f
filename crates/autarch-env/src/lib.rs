//! The evaluation environment: a pure, read-only view over a snapshot,
//! engine memory, terrain, and the running faction/role preferences, with a
//! fixed vocabulary of query operations. Rule conditions and actions are
//! written against this vocabulary rather than against the snapshot
//! directly, so the doctrine compiler only ever needs to know query names,
//! not snapshot internals.

pub mod target;

use std::collections::HashSet;

use autarch_core::constants::{BASE_UNDER_ATTACK_FRACTION, BUILDING_DAMAGED_THRESHOLD};
use autarch_core::memory::{Domain, EngineMemory};
use autarch_core::role::{code_matches, RoleRegistry};
use autarch_core::snapshot::{Capturable, EnemyUnit, OwnedBuilding, OwnedUnit, Snapshot, TerrainCell};
use autarch_core::types::Position;

pub use target::{best_air_target, best_ground_target, target_type_value};

/// Type codes excluded from the "idle ground units" pool: these have their
/// own dedicated idle queries or shouldn't be swept into generic formations.
const NON_GENERIC_GROUND_EXCLUSIONS: &[&str] = &["harv", "mcv"];

/// A pure view over one tick's data, plus the faction/role context needed to
/// resolve role and type queries. Borrows everything; never mutates.
pub struct Environment<'a> {
    pub snapshot: &'a Snapshot,
    pub memory: &'a EngineMemory,
    pub roles: &'a RoleRegistry,
    pub faction: &'a str,
}

impl<'a> Environment<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        memory: &'a EngineMemory,
        roles: &'a RoleRegistry,
        faction: &'a str,
    ) -> Self {
        Self {
            snapshot,
            memory,
            roles,
            faction,
        }
    }

    // --- Type/role queries ---

    pub fn has_unit(&self, type_code: &str) -> bool {
        self.snapshot
            .units
            .iter()
            .any(|u| code_matches(&u.type_code, type_code))
    }

    pub fn has_building(&self, type_code: &str) -> bool {
        self.snapshot
            .buildings
            .iter()
            .any(|b| code_matches(&b.type_code, type_code))
    }

    pub fn unit_count(&self, type_code: &str) -> usize {
        self.snapshot
            .units
            .iter()
            .filter(|u| code_matches(&u.type_code, type_code))
            .count()
    }

    pub fn building_count(&self, type_code: &str) -> usize {
        self.snapshot
            .buildings
            .iter()
            .filter(|b| code_matches(&b.type_code, type_code))
            .count()
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self.roles.get(role) {
            Some(_) => self
                .snapshot
                .units
                .iter()
                .map(|u| u.type_code.as_str())
                .chain(self.snapshot.buildings.iter().map(|b| b.type_code.as_str()))
                .any(|code| self.roles.type_has_role(code, role)),
            None => false,
        }
    }

    pub fn role_count(&self, role: &str) -> usize {
        self.snapshot
            .units
            .iter()
            .map(|u| u.type_code.as_str())
            .chain(self.snapshot.buildings.iter().map(|b| b.type_code.as_str()))
            .filter(|code| self.roles.type_has_role(code, role))
            .count()
    }

    pub fn can_build_role(&self, role: &str) -> bool {
        self.buildable_type(role).is_some()
    }

    pub fn buildable_type(&self, role: &str) -> Option<&str> {
        let def = self.roles.get(role)?;
        let queue = self.snapshot.queue(&def.queue)?;
        let buildable: HashSet<String> = queue.buildable.iter().cloned().collect();
        self.roles.buildable_type(role, self.faction, &buildable)
    }

    // --- Queue state ---

    pub fn queue_busy(&self, queue: &str) -> bool {
        self.snapshot.queue(queue).map(|q| q.busy()).unwrap_or(false)
    }

    pub fn queue_ready(&self, queue: &str) -> bool {
        self.snapshot.queue(queue).map(|q| q.ready()).unwrap_or(false)
    }

    pub fn can_build(&self, queue: &str, item: &str) -> bool {
        self.snapshot
            .queue(queue)
            .map(|q| q.buildable.iter().any(|b| code_matches(b, item)))
            .unwrap_or(false)
    }

    // --- Economy ---

    pub fn cash(&self) -> f64 {
        self.snapshot.economy.total_cash()
    }

    pub fn power_excess(&self) -> f64 {
        self.snapshot.economy.power_excess()
    }

    pub fn resources_near_cap(&self) -> bool {
        self.snapshot.economy.resources_near_cap()
    }

    // --- Unit pools ---

    fn is_retreating(&self, id: u32) -> bool {
        self.memory.retreating_units.contains_key(&id)
    }

    fn squad_member_ids(&self) -> HashSet<u32> {
        self.memory
            .squads
            .values()
            .flat_map(|s| s.members.iter().copied())
            .collect()
    }

    pub fn idle_harvesters(&self) -> Vec<&OwnedUnit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| u.idle && code_matches(&u.type_code, "harv"))
            .collect()
    }

    pub fn idle_engineers(&self) -> Vec<&OwnedUnit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| u.idle && code_matches(&u.type_code, "e6"))
            .collect()
    }

    /// Idle ground units, excluding harvesters, MCVs, aircraft, and naval units.
    pub fn idle_ground_units(&self) -> Vec<&OwnedUnit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| {
                u.idle
                    && !NON_GENERIC_GROUND_EXCLUSIONS
                        .iter()
                        .any(|ex| code_matches(&u.type_code, ex))
                    && !is_air_type(&u.type_code)
                    && !is_naval_type(&u.type_code)
            })
            .collect()
    }

    pub fn idle_combat_aircraft(&self) -> Vec<&OwnedUnit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| u.idle && is_air_type(&u.type_code))
            .collect()
    }

    pub fn idle_naval_units(&self) -> Vec<&OwnedUnit> {
        self.snapshot
            .units
            .iter()
            .filter(|u| u.idle && is_naval_type(&u.type_code))
            .collect()
    }

    pub fn unassigned_idle_ground(&self) -> Vec<&OwnedUnit> {
        let taken = self.squad_member_ids();
        self.idle_ground_units()
            .into_iter()
            .filter(|u| !taken.contains(&u.id))
            .collect()
    }

    pub fn unassigned_idle_air(&self) -> Vec<&OwnedUnit> {
        let taken = self.squad_member_ids();
        self.idle_combat_aircraft()
            .into_iter()
            .filter(|u| !taken.contains(&u.id))
            .collect()
    }

    pub fn unassigned_idle_naval(&self) -> Vec<&OwnedUnit> {
        let taken = self.squad_member_ids();
        self.idle_naval_units()
            .into_iter()
            .filter(|u| !taken.contains(&u.id))
            .collect()
    }

    // --- Combat geometry ---

    fn origin(&self) -> Position {
        self.snapshot
            .buildings
            .first()
            .map(|b| b.position)
            .unwrap_or_default()
    }

    pub fn nearest_enemy(&self) -> Option<&EnemyUnit> {
        let origin = self.origin();
        self.snapshot
            .enemies
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance_to(&origin)
                    .total_cmp(&b.position.distance_to(&origin))
            })
    }

    pub fn nearest_enemy_base(&self) -> Option<Position> {
        let origin = self.origin();
        self.memory
            .enemy_bases
            .values()
            .map(|intel| Position::new(intel.x, intel.y))
            .min_by(|a, b| a.distance_to(&origin).total_cmp(&b.distance_to(&origin)))
    }

    pub fn base_under_attack(&self) -> bool {
        let threshold = self.snapshot.map.diagonal() * BASE_UNDER_ATTACK_FRACTION;
        self.snapshot.buildings.iter().any(|building| {
            self.snapshot
                .enemies
                .iter()
                .any(|enemy| enemy.position.distance_to(&building.position) <= threshold)
        })
    }

    // --- Terrain ---

    pub fn terrain_at(&self, pos: Position) -> Option<TerrainCell> {
        self.snapshot.terrain.as_ref().map(|grid| grid.cell_at(pos))
    }

    pub fn is_land_at(&self, pos: Position) -> bool {
        !matches!(self.terrain_at(pos), Some(TerrainCell::Water))
    }

    pub fn is_water_at(&self, pos: Position) -> bool {
        matches!(self.terrain_at(pos), Some(TerrainCell::Water))
    }

    /// True when the map is terrain-unaware (no grid) or the grid has any
    /// water cell. Naval-dependent rules treat "unknown" as "assume water
    /// might exist" rather than silently disabling naval play.
    pub fn map_has_water(&self) -> bool {
        match &self.snapshot.terrain {
            Some(grid) => grid.has_water(),
            None => true,
        }
    }

    // --- Intel ---

    pub fn has_enemy_intel(&self) -> bool {
        self.memory.enemy_bases.values().any(|intel| intel.from_buildings)
    }

    pub fn enemies_visible(&self) -> bool {
        !self.snapshot.enemies.is_empty()
    }

    // --- Squads ---

    pub fn squad_exists(&self, name: &str) -> bool {
        self.memory.squads.contains_key(name)
    }

    pub fn squad_size(&self, name: &str) -> usize {
        self.memory.squads.get(name).map(|s| s.members.len()).unwrap_or(0)
    }

    pub fn squad_idle_count(&self, name: &str) -> usize {
        let Some(squad) = self.memory.squads.get(name) else {
            return 0;
        };
        self.snapshot
            .units
            .iter()
            .filter(|u| u.idle && squad.members.contains(&u.id))
            .count()
    }

    pub fn squad_ready_ratio(&self, name: &str) -> f64 {
        self.memory.squads.get(name).map(|s| s.ready_ratio()).unwrap_or(0.0)
    }

    pub fn squad_needs_reinforcement(&self, name: &str) -> bool {
        self.memory
            .squads
            .get(name)
            .map(|s| s.ready_ratio() < 1.0)
            .unwrap_or(true)
    }

    /// Ratio of nearby enemy strength to squad strength within `radius` of
    /// the squad's centroid, by unit count (a coarse proxy: one unit is one
    /// point of strength on both sides).
    pub fn squad_threat_ratio(&self, name: &str, radius: f64) -> f64 {
        let Some(squad) = self.memory.squads.get(name) else {
            return 0.0;
        };
        let members: Vec<&OwnedUnit> = self
            .snapshot
            .units
            .iter()
            .filter(|u| squad.members.contains(&u.id))
            .collect();
        if members.is_empty() {
            return 0.0;
        }
        let centroid_x = members.iter().map(|u| u.position.x).sum::<f64>() / members.len() as f64;
        let centroid_y = members.iter().map(|u| u.position.y).sum::<f64>() / members.len() as f64;
        let centroid = Position::new(centroid_x, centroid_y);

        let nearby_enemies = self
            .snapshot
            .enemies
            .iter()
            .filter(|e| e.position.distance_to(&centroid) <= radius)
            .count();

        nearby_enemies as f64 / members.len() as f64
    }

    // --- Damaged assets ---

    pub fn damaged_buildings(&self) -> Vec<&OwnedBuilding> {
        self.snapshot
            .buildings
            .iter()
            .filter(|b| b.max_hp > 0.0 && b.hp / b.max_hp < BUILDING_DAMAGED_THRESHOLD)
            .collect()
    }

    /// Damaged combat units eligible for a service-depot repair run:
    /// vehicles and aircraft only, excluding harvesters, MCVs, rangers,
    /// engineers, transports, and infantry (which can't dock at a depot).
    pub fn damaged_combat_units(&self, threshold: f64) -> Vec<&OwnedUnit> {
        const EXCLUDED: &[&str] = &["harv", "mcv", "ranger", "e6", "apc", "lst"];
        self.snapshot
            .units
            .iter()
            .filter(|u| {
                u.max_hp > 0.0
                    && u.hp / u.max_hp < threshold
                    && !EXCLUDED.iter().any(|ex| code_matches(&u.type_code, ex))
                    && !self.is_retreating(u.id)
            })
            .collect()
    }

    // --- Targeting ---

    pub fn best_ground_target(&self) -> Option<&EnemyUnit> {
        best_ground_target(self.snapshot.enemies.iter(), self.origin())
    }

    pub fn best_air_target(&self) -> Option<&EnemyUnit> {
        best_air_target(self.snapshot.enemies.iter(), self.origin())
    }

    pub fn capturables(&self) -> &[Capturable] {
        &self.snapshot.capturables
    }

    pub fn domain_of(&self, type_code: &str) -> Domain {
        if is_air_type(type_code) {
            Domain::Air
        } else if is_naval_type(type_code) {
            Domain::Naval
        } else {
            Domain::Ground
        }
    }
}

fn is_air_type(type_code: &str) -> bool {
    const AIR_MARKERS: &[&str] = &["yak", "mig", "heli", "orca", "heli", "air"];
    AIR_MARKERS.iter().any(|m| type_code.to_ascii_lowercase().contains(m))
}

fn is_naval_type(type_code: &str) -> bool {
    const NAVAL_MARKERS: &[&str] = &["boat", "ship", "sub", "dest", "cruiser", "lst"];
    NAVAL_MARKERS.iter().any(|m| type_code.to_ascii_lowercase().contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::snapshot::{Economy, MapDims, ProductionQueue};

    fn snapshot_with_buildings(positions: &[(f64, f64)]) -> Snapshot {
        Snapshot {
            tick: 1,
            economy: Economy::default(),
            units: vec![],
            buildings: positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| OwnedBuilding {
                    id: i as u32,
                    type_code: "fact".to_string(),
                    position: Position::new(x, y),
                    hp: 1000.0,
                    max_hp: 1000.0,
                })
                .collect(),
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

    #[test]
    fn base_under_attack_detects_nearby_enemy() {
        let mut snapshot = snapshot_with_buildings(&[(500.0, 500.0)]);
        snapshot.enemies.push(EnemyUnit {
            id: 99,
            owner: "enemy".to_string(),
            type_code: "e1".to_string(),
            position: Position::new(520.0, 500.0),
            hp: 50.0,
            max_hp: 50.0,
            is_building: false,
        });
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert!(env.base_under_attack());
    }

    #[test]
    fn base_under_attack_false_when_enemy_far() {
        let mut snapshot = snapshot_with_buildings(&[(0.0, 0.0)]);
        snapshot.enemies.push(EnemyUnit {
            id: 99,
            owner: "enemy".to_string(),
            type_code: "e1".to_string(),
            position: Position::new(999.0, 999.0),
            hp: 50.0,
            max_hp: 50.0,
            is_building: false,
        });
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert!(!env.base_under_attack());
    }

    #[test]
    fn map_has_water_defaults_true_without_grid() {
        let snapshot = snapshot_with_buildings(&[(0.0, 0.0)]);
        let memory = EngineMemory::new();
        let roles = RoleRegistry::new();
        let env = Environment::new(&snapshot, &memory, &roles, "soviet");
        assert!(env.map_has_water());
    }
}
