//! Side-effecting action closures: the library of things a compiled rule
//! can do once its condition matches. Split into the generic, role-driven
//! factories most rules are built from (`basic`), the non-exclusive micro
//! behaviors (`micro`), and the three named algorithms spec.md §4.6 calls
//! out specifically (`placement`, `hunt`, `capture`).

pub mod basic;
pub mod capture;
pub mod combat;
pub mod hunt;
pub mod micro;
pub mod placement;
pub mod scout;

pub use basic::{
    cancel_stuck_production, deploy_mcv, fire_support_power, place_ready_building, produce_role,
    repair_damaged_buildings, return_idle_harvesters,
};
pub use capture::{capture_action, next_capture_step, CaptureStep};
pub use combat::{disengage_squad, engage_squad, focus_fire_weakest, form_squad, scramble_defense};
pub use hunt::{advance_hunt, hunt_action};
pub use micro::{clear_healed_retreaters, flee_harvesters, recall_overextended, retreat_damaged_units};
pub use placement::placement_hint;
pub use scout::{dedicated_scout, general_scout};
