//! The per-tick game-state snapshot received from the game host.

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, Position};
pub use crate::types::MapDims;

/// Coarse terrain cell classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainCell {
    Land,
    Water,
    Cliff,
    Bridge,
}

/// A coarse 2-D terrain grid supplied at `hello` time. Absence of a grid
/// (i.e. `Snapshot::terrain.is_none()`) means "terrain-unaware": all
/// terrain queries degrade to permissive defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub cols: u32,
    pub rows: u32,
    pub cell_w: f64,
    pub cell_h: f64,
    /// Row-major cell classifications, length `cols * rows`.
    pub cells: Vec<TerrainCell>,
}

impl TerrainGrid {
    /// Look up the cell under a map-pixel position, clamped to grid bounds.
    pub fn cell_at(&self, pos: Position) -> TerrainCell {
        if self.cols == 0 || self.rows == 0 {
            return TerrainCell::Land;
        }
        let col = ((pos.x / self.cell_w) as i64).clamp(0, self.cols as i64 - 1) as u32;
        let row = ((pos.y / self.cell_h) as i64).clamp(0, self.rows as i64 - 1) as u32;
        self.cells[(row * self.cols + col) as usize]
    }

    /// True if any cell in the grid is water.
    pub fn has_water(&self) -> bool {
        self.cells.iter().any(|c| matches!(c, TerrainCell::Water))
    }
}

/// Player economy state for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub cash: f64,
    pub ore_stored: f64,
    pub ore_capacity: f64,
    pub power_provided: f64,
    pub power_drained: f64,
    pub power_state: PowerState,
}

impl Economy {
    /// Liquid cash plus stored ore.
    pub fn total_cash(&self) -> f64 {
        self.cash + self.ore_stored
    }

    /// Power provided minus power drained; negative means a power deficit.
    pub fn power_excess(&self) -> f64 {
        self.power_provided - self.power_drained
    }

    /// True when stored ore exceeds the near-capacity fraction.
    pub fn resources_near_cap(&self) -> bool {
        self.ore_capacity > 0.0
            && self.ore_stored > crate::constants::RESOURCES_NEAR_CAP_FRACTION * self.ore_capacity
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    #[default]
    Normal,
    Low,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedUnit {
    pub id: ActorId,
    pub type_code: String,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    pub idle: bool,
    pub cargo: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedBuilding {
    pub id: ActorId,
    pub type_code: String,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionQueue {
    pub queue: String,
    pub current_item: Option<String>,
    /// Progress of the current item, 0-100. Meaningless when `current_item` is `None`.
    pub progress: f64,
    pub buildable: Vec<String>,
}

impl ProductionQueue {
    /// An item is in progress and not yet complete.
    pub fn busy(&self) -> bool {
        self.current_item.is_some() && self.progress < 100.0
    }

    /// An item is complete and awaiting placement/collection.
    pub fn ready(&self) -> bool {
        self.current_item.is_some() && self.progress >= 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub id: ActorId,
    pub owner: String,
    pub type_code: String,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    /// True when this sighting is a building rather than a mobile unit.
    /// Building sightings are the only ones that overwrite remembered base
    /// intel; unit-only sightings only ever seed a not-yet-known base.
    #[serde(default)]
    pub is_building: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capturable {
    pub id: ActorId,
    pub type_code: String,
    pub position: Position,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportPower {
    pub key: String,
    pub ready: bool,
    pub remaining_ticks: u32,
    pub total_ticks: u32,
}

/// The complete per-tick game-state snapshot sent by the game host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub economy: Economy,
    pub units: Vec<OwnedUnit>,
    pub buildings: Vec<OwnedBuilding>,
    pub production: Vec<ProductionQueue>,
    pub enemies: Vec<EnemyUnit>,
    pub capturables: Vec<Capturable>,
    pub support_powers: Vec<SupportPower>,
    pub map: MapDims,
    pub terrain: Option<TerrainGrid>,
}

impl Snapshot {
    pub fn queue(&self, name: &str) -> Option<&ProductionQueue> {
        self.production.iter().find(|q| q.queue == name)
    }
}
