//! Cross-module tests: invariants that span more than one of this crate's
//! types. Single-module behavior is covered by the `#[cfg(test)]` blocks
//! colocated with each module.

use std::collections::HashSet;

use crate::role::RoleRegistry;
use crate::snapshot::{Economy, MapDims, ProductionQueue, Snapshot};
use crate::wire::Hello;

fn empty_snapshot() -> Snapshot {
    Snapshot {
        tick: 0,
        economy: Economy::default(),
        units: vec![],
        buildings: vec![],
        production: vec![ProductionQueue {
            queue: "Building".to_string(),
            current_item: None,
            progress: 0.0,
            buildable: vec!["barr.soviet".to_string()],
        }],
        enemies: vec![],
        capturables: vec![],
        support_powers: vec![],
        map: MapDims {
            width: 100.0,
            height: 100.0,
        },
        terrain: None,
    }
}

#[test]
fn registry_buildable_type_matches_snapshot_queue_contents() {
    let mut reg = RoleRegistry::new();
    reg.insert("barracks", "Building", ["barr".to_string()]);

    let snapshot = empty_snapshot();
    let queue = snapshot.queue("Building").expect("queue present");
    let buildable: HashSet<String> = queue.buildable.iter().cloned().collect();

    let found = reg
        .buildable_type("barracks", "soviet", &buildable)
        .expect("faction-suffixed match");
    assert_eq!(found, "barr.soviet");
}

#[test]
fn hello_without_terrain_round_trips_through_json() {
    let hello = Hello {
        player: "p1".to_string(),
        faction: "allied".to_string(),
        terrain: None,
    };
    let json = serde_json::to_string(&hello).unwrap();
    let back: Hello = serde_json::from_str(&json).unwrap();
    assert_eq!(back.player, hello.player);
    assert!(back.terrain.is_none());
}
