//! Named priority bands, one per emitted block, and the documented
//! relative offsets within the combat band. Kept in one file so a future
//! reshuffle of precedence touches one place.

// --- Fixed bands (always-on/Core competes above everything) ---

pub const CORE_DEPLOY: i32 = 1000;
pub const CORE_RECOVER_MCV: i32 = 990;
pub const CORE_PLACE_DEFENSE: i32 = 960;
pub const CORE_PLACE_BUILDING: i32 = 950;
pub const CORE_CANCEL_STUCK_AIRCRAFT: i32 = 940;
pub const CORE_CAPTURE: i32 = 850;
pub const CORE_REBUILD_BASE: i32 = 930;
pub const CORE_SCRAMBLE_GROUND: i32 = 920;
pub const CORE_SCRAMBLE_NAVAL: i32 = 905;
pub const CORE_REPAIR_BUILDINGS: i32 = 870;
pub const CORE_RETURN_HARVESTERS: i32 = 860;

pub const SUPPORT_POWER_MIN: i32 = 800;
pub const SUPPORT_POWER_MAX: i32 = 830;

pub const ECONOMY_MIN: i32 = 700;
pub const ECONOMY_MAX: i32 = 740;

pub const MILITARY_BUILDING_MIN: i32 = 620;
pub const MILITARY_BUILDING_MAX: i32 = 660;

pub const TECH_MIN: i32 = 560;
pub const TECH_MAX: i32 = 600;

pub const DEFENSE_MIN: i32 = 500;
pub const DEFENSE_MAX: i32 = 550;

pub const PRODUCTION_MIN: i32 = 300;
pub const PRODUCTION_MAX: i32 = 450;

// --- Combat band, with documented relative offsets ---

pub const COMBAT_ENGAGE_MIN: i32 = 200;
pub const COMBAT_ENGAGE_MAX: i32 = 280;
pub const COMBAT_FORMATION_OFFSET: i32 = 5;
pub const COMBAT_REENGAGE_OFFSET: i32 = -2;
pub const COMBAT_HUNT_OFFSET: i32 = -10;
pub const COMBAT_AIR_OFFSET: i32 = -5;
pub const COMBAT_NAVAL_OFFSET: i32 = -15;

// --- Micro: non-exclusive, all co-fire in a flat band ---

pub const MICRO_PRIORITY: i32 = 100;

// --- Recon: lowest band, interpolates with the scout weight ---

pub const RECON_MIN: i32 = 30;
pub const RECON_MAX: i32 = 80;
