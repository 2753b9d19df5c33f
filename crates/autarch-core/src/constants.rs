//! Tuning constants, grouped by subsystem. Several of these pin down
//! values intentionally left as "tune during play testing"; keeping them
//! here means a future tuning pass touches one file instead of hunting
//! through the rule engine.

// --- Tick / cooldowns ---

/// Cooldown (ticks) between MCV-deploy commands for the same player.
pub const MCV_DEPLOY_COOLDOWN_TICKS: u64 = 50;

/// How often the "no rule fired" diagnostic may be logged.
pub const IDLE_DIAGNOSTIC_INTERVAL_TICKS: u64 = 100;

/// Default interval (ticks) between strategist re-evaluations, absent an
/// urgent event or an explicit `--strategist-interval` override.
pub const STRATEGIST_DEFAULT_INTERVAL_TICKS: u64 = 150;

/// How often a stale intel entry is still considered fresh, in ticks, before
/// a hunt squad reverts to sweeping from the ring centroid.
pub const HUNT_RING_COUNT: u32 = 8;

// --- Doctrine weight gates ---

pub const WEIGHT_ENABLED: f32 = 0.1;
pub const WEIGHT_MODERATE: f32 = 0.2;
pub const WEIGHT_SIGNIFICANT: f32 = 0.3;
pub const WEIGHT_HIGH: f32 = 0.4;
pub const WEIGHT_DOMINANT: f32 = 0.5;
pub const WEIGHT_EXTREME: f32 = 0.6;

// --- Doctrine group-size ranges ---

pub const GROUND_GROUP_MIN: u32 = 3;
pub const GROUND_GROUP_MAX: u32 = 15;
pub const AIR_GROUP_MIN: u32 = 1;
pub const AIR_GROUP_MAX: u32 = 8;
pub const NAVAL_GROUP_MIN: u32 = 2;
pub const NAVAL_GROUP_MAX: u32 = 10;

// --- Economy ---

/// Resources are considered "near cap" above this fraction of capacity.
pub const RESOURCES_NEAR_CAP_FRACTION: f64 = 0.8;

// --- Combat geometry ---

/// Fraction of the map diagonal within which an enemy is considered to be
/// attacking a building.
pub const BASE_UNDER_ATTACK_FRACTION: f64 = 0.2;

/// Fraction of the map diagonal beyond which a squad member is considered
/// overextended and recalled.
pub const SQUAD_LEASH_FRACTION: f64 = 0.6;

// --- Damage thresholds ---

/// HP/maxHP ratio below which a building is considered damaged.
pub const BUILDING_DAMAGED_THRESHOLD: f64 = 0.75;

/// HP/maxHP ratio below which a combat unit retreats toward repair.
pub const UNIT_RETREAT_THRESHOLD: f64 = 0.3;

/// HP/maxHP ratio at or above which a retreating unit is considered
/// healed and released back into the idle/combat pools.
pub const UNIT_RETREAT_CLEAR_THRESHOLD: f64 = 0.9;

// --- Known-base hunt ---

/// Minimum hunt-ring radius factor (of map_dim/16) at zero aggression.
pub const HUNT_RING_BASE_FACTOR: f64 = 0.25;

/// Additional hunt-ring radius factor scaled by aggression.
pub const HUNT_RING_AGGRESSION_FACTOR: f64 = 1.25;

// --- Event detector ---

/// Minimum previous combat-unit count for `army_devastated` to be eligible.
pub const ARMY_DEVASTATED_MIN_PREV_UNITS: u32 = 6;

/// Fraction of the combat-unit pool that must be lost this tick for
/// `army_devastated` to fire.
pub const ARMY_DEVASTATED_LOSS_FRACTION: f64 = 0.5;

/// Cash+stored-ore level above which an `economy_crisis` baseline is tracked.
pub const ECONOMY_CRISIS_HIGH_WATERMARK: f64 = 1000.0;

/// Cash+stored-ore level below which, having previously exceeded the high
/// watermark, an `economy_crisis` event fires.
pub const ECONOMY_CRISIS_LOW_WATERMARK: f64 = 200.0;

/// Attrition-window loss thresholds per domain for `strategy_countered`.
pub const COUNTER_THRESHOLD_INFANTRY: u32 = 2;
pub const COUNTER_THRESHOLD_VEHICLE: u32 = 3;
pub const COUNTER_THRESHOLD_AIRCRAFT: u32 = 2;

/// Cooldown (ticks) after a `strategy_countered` fire for the same domain.
pub const STRATEGY_COUNTERED_COOLDOWN_TICKS: u64 = 200;

/// Width of the sliding window (ticks) over which per-domain unit losses
/// accumulate toward the `strategy_countered` threshold. Losses older than
/// this roll off the window even if the threshold was never reached.
pub const STRATEGY_COUNTER_WINDOW_TICKS: u64 = 300;

/// Game-phase tick fallbacks, used when building-milestone detection is
/// inconclusive.
pub const PHASE_EARLY_TO_MID_TICK: u64 = 2000;
pub const PHASE_MID_TO_LATE_TICK: u64 = 5000;

// --- Recon ---

/// Radius of the 9-point scout search pattern, as a fraction of half the
/// map's shorter dimension, centered on the map itself (not the base).
pub const SCOUT_RING_RADIUS_FRACTION: f64 = 0.35;

/// Number of ring points in the scout search pattern (plus the center,
/// for 9 total waypoints).
pub const SCOUT_RING_POINTS: u32 = 8;

// --- Micro ---

/// Local enemy-to-squad strength ratio above which a squad disengages
/// rather than presses an attack. Tuned from play testing.
pub const SQUAD_DISENGAGE_THREAT_RATIO: f64 = 1.5;

/// Detection radius (map units) used by `flee_harvesters`, scaled down as
/// the economy weight rises (a more economy-focused doctrine pulls
/// harvesters out of danger sooner).
pub const HARVESTER_FLEE_RADIUS_BASE: f64 = 300.0;
