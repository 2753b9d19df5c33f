//! Shared rule vocabulary. The `Rule`/`RuleSet` types themselves live in
//! `autarch-rules`, which also depends on `autarch-env`'s environment type;
//! this crate only defines the category tags both sides agree on.

use serde::{Deserialize, Serialize};

/// Category gate: at most one exclusive rule per category fires per tick,
/// preventing contradictory orders to the same production queue or unit
/// pool. Non-exclusive categories (e.g. `Micro`) may co-fire freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Core,
    Economy,
    MilitaryBuilding,
    Defense,
    Tech,
    Production,
    Combat,
    Micro,
    SupportPower,
    Recon,
}
