//! Geometry queries over the coarse terrain grid handed to us at `hello`
//! time. The grid itself (`TerrainGrid`/`TerrainCell`) lives in
//! `autarch-core` since the wire layer needs to (de)serialize it; this
//! crate is where the rule engine and action library go to ask questions
//! about it.

pub mod query;

pub use query::{nearest_land, path_blocked, ring_points};
