//! Canonical production queue names a game host is expected to expose.

pub const BUILDING: &str = "Building";
pub const DEFENSE: &str = "Defense";
pub const INFANTRY: &str = "Infantry";
pub const VEHICLE: &str = "Vehicle";
pub const SHIP: &str = "Ship";
pub const AIRCRAFT: &str = "Aircraft";
