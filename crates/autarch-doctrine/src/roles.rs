//! Logical role names the compiler reasons about. These are the values a
//! concrete game's role registry must populate (role name -> queue + type
//! codes); the compiler never invents a role it can't name here.

pub const CONSTRUCTION_YARD: &str = "construction_yard";
pub const MCV: &str = "mcv_unit";
pub const POWER_PLANT: &str = "power_plant";
pub const ADVANCED_POWER: &str = "advanced_power";
pub const REFINERY: &str = "refinery";
pub const ORE_SILO: &str = "ore_silo";
pub const RADAR: &str = "radar";

pub const BARRACKS: &str = "barracks";
pub const WAR_FACTORY: &str = "war_factory";
pub const AIRFIELD: &str = "airfield";
pub const SERVICE_DEPOT: &str = "service_depot";
pub const NAVAL_YARD: &str = "naval_yard";

pub const BASE_DEFENSE: &str = "base_defense";
pub const AA_DEFENSE: &str = "aa_defense";
pub const GAP_GENERATOR: &str = "gap_generator";

pub const TECH_CENTER: &str = "tech_center";
pub const MISSILE_SILO: &str = "missile_silo";
pub const IRON_CURTAIN_BUILDING: &str = "iron_curtain_building";

pub const ENGINEER: &str = "engineer";
pub const INFANTRY: &str = "infantry";
pub const SPECIALIST_INFANTRY: &str = "specialist_infantry";
pub const VEHICLE: &str = "vehicle";
pub const SIEGE_VEHICLE: &str = "siege_vehicle";
pub const HEAVY_VEHICLE: &str = "heavy_vehicle";
pub const FLAK_TRUCK: &str = "flak_truck";
pub const SCOUT_VEHICLE: &str = "scout_vehicle";
pub const AIRCRAFT: &str = "aircraft";
pub const ADVANCED_AIRCRAFT: &str = "advanced_aircraft";
pub const SHIP: &str = "ship";
pub const ADVANCED_SHIP: &str = "advanced_ship";
pub const GUNBOAT: &str = "gunboat";
pub const ROCKET_SOLDIER: &str = "rocket_soldier";
pub const RANGER_SCOUT: &str = "ranger_scout";

pub const NUKE_POWER: &str = "nuke";
pub const IRON_CURTAIN_POWER: &str = "iron_curtain";
pub const SPY_PLANE_POWER: &str = "spy_plane";
pub const PARATROOPERS_POWER: &str = "paratroopers";
pub const PARABOMBS_POWER: &str = "parabombs";

pub const GROUND_ATTACK_SQUAD: &str = "ground_attack";
pub const AIR_ATTACK_SQUAD: &str = "air_attack";
pub const NAVAL_ATTACK_SQUAD: &str = "naval_attack";

/// Building roles monotonic rebuild rules are generated for: once owned,
/// losing one triggers a rebuild attempt at the same priority as every
/// other core rule.
pub const REBUILDABLE_BUILDING_ROLES: &[&str] = &[
    CONSTRUCTION_YARD,
    POWER_PLANT,
    REFINERY,
    RADAR,
    BARRACKS,
    WAR_FACTORY,
    AIRFIELD,
    SERVICE_DEPOT,
    NAVAL_YARD,
    TECH_CENTER,
];
