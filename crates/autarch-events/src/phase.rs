//! Game-phase labeling: a coarse milestone derived primarily from owned
//! buildings, falling back to tick thresholds when no milestone building is
//! present yet (spec.md §9 open question — the exact thresholds are a
//! heuristic pinned here, not derived from play data).

use autarch_core::constants::{PHASE_EARLY_TO_MID_TICK, PHASE_MID_TO_LATE_TICK};
use autarch_core::role::code_matches;
use autarch_core::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

/// Buildings whose presence marks the mid-game milestone: any tech/radar
/// path structure.
const MID_MILESTONE_MARKERS: &[&str] = &["dome", "stek", "atek"];

/// Buildings whose presence marks the late-game milestone: a superweapon
/// silo or its support structure.
const LATE_MILESTONE_MARKERS: &[&str] = &["silo", "iron", "pdox"];

fn has_any(snapshot: &Snapshot, markers: &[&str]) -> bool {
    snapshot
        .buildings
        .iter()
        .any(|b| markers.iter().any(|m| code_matches(&b.type_code, m)))
}

/// Derive the current phase label. Building milestones take precedence;
/// with none present yet, the tick thresholds carry the label instead so a
/// sidecar that starts mid-match or skips a milestone building still
/// transitions out of `Early`.
pub fn derive_phase(snapshot: &Snapshot) -> GamePhase {
    if has_any(snapshot, LATE_MILESTONE_MARKERS) {
        return GamePhase::Late;
    }
    if has_any(snapshot, MID_MILESTONE_MARKERS) {
        return GamePhase::Mid;
    }
    if snapshot.tick >= PHASE_MID_TO_LATE_TICK {
        return GamePhase::Late;
    }
    if snapshot.tick >= PHASE_EARLY_TO_MID_TICK {
        return GamePhase::Mid;
    }
    GamePhase::Early
}
