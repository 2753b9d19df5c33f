//! End-to-end scenarios exercised against the full doctrine-compile ->
//! rule-engine pipeline, independent of the socket transport (which has
//! its own coverage in `autarch-net`). These mirror the scenarios a
//! complete implementation of this kind of system is expected to satisfy:
//! deploy-on-first-tick, a starved-power economy, a fog-of-war hunt, the
//! empty-snapshot boundary case, and a hot-swapped doctrine.

use std::sync::Arc;

use autarch_core::doctrine::Doctrine;
use autarch_core::role::RoleRegistry;
use autarch_core::snapshot::{
    Economy, EnemyUnit, MapDims, OwnedBuilding, OwnedUnit, ProductionQueue, Snapshot,
};
use autarch_core::types::Position;
use autarch_core::wire::OutboundCommand;
use autarch_rules::{RuleEngine, RuleSet};

fn base_snapshot(tick: u64) -> Snapshot {
    Snapshot {
        tick,
        economy: Economy::default(),
        units: vec![],
        buildings: vec![],
        production: vec![],
        enemies: vec![],
        capturables: vec![],
        support_powers: vec![],
        map: MapDims {
            width: 2000.0,
            height: 2000.0,
        },
        terrain: None,
    }
}

fn engine_with(doctrine: &Doctrine, registry: Arc<RoleRegistry>, seed: u64) -> RuleEngine {
    let rules = autarch_doctrine::compile(doctrine, &registry);
    let compiled = RuleSet::compile(rules).expect("doctrine-synthesized rules always compile");
    RuleEngine::new(registry, "soviet".to_string(), compiled, seed)
}

fn contains_deploy(commands: &[OutboundCommand], actor_id: u32) -> bool {
    commands
        .iter()
        .any(|c| matches!(c, OutboundCommand::Deploy { actor_id: id } if *id == actor_id))
}

/// Scenario 1 (spec §8): deploy on first tick, then cooldown suppresses a
/// second deploy within the cooldown window.
#[tokio::test]
async fn deploy_on_first_tick_then_cooldown_suppresses_repeat() {
    let engine = engine_with(&Doctrine::default(), Arc::new(RoleRegistry::new()), 1);

    let mut snapshot = base_snapshot(1);
    snapshot.economy.cash = 5000.0;
    snapshot.units = vec![OwnedUnit {
        id: 7,
        type_code: "mcv".to_string(),
        position: Position::default(),
        hp: 100.0,
        max_hp: 100.0,
        idle: true,
        cargo: 0,
    }];

    let first = engine.evaluate(&snapshot).await;
    assert!(contains_deploy(&first, 7), "expected a deploy command on the first tick");

    snapshot.tick = 10;
    let second = engine.evaluate(&snapshot).await;
    assert!(!contains_deploy(&second, 7), "deploy should be on cooldown within 50 ticks");
}

/// Scenario 2 (spec §8): a power deficit triggers a power-plant build and
/// blocks unit production that would otherwise be affordable.
#[tokio::test]
async fn starved_power_builds_a_power_plant_and_blocks_unit_production() {
    let mut registry = RoleRegistry::new();
    registry.insert("power_plant", "Building", ["powr".to_string()]);
    registry.insert("infantry", "Infantry", ["e1".to_string()]);
    let engine = engine_with(&Doctrine::default(), Arc::new(registry), 2);

    let mut snapshot = base_snapshot(1);
    snapshot.economy.cash = 400.0;
    snapshot.economy.power_provided = 100.0;
    snapshot.economy.power_drained = 160.0;
    snapshot.buildings = vec![
        OwnedBuilding {
            id: 1,
            type_code: "proc".to_string(),
            position: Position::default(),
            hp: 1000.0,
            max_hp: 1000.0,
        },
        OwnedBuilding {
            id: 2,
            type_code: "barr".to_string(),
            position: Position::default(),
            hp: 1000.0,
            max_hp: 1000.0,
        },
    ];
    snapshot.production = vec![
        ProductionQueue {
            queue: "Building".to_string(),
            current_item: None,
            progress: 0.0,
            buildable: vec!["powr".to_string()],
        },
        ProductionQueue {
            queue: "Infantry".to_string(),
            current_item: None,
            progress: 0.0,
            buildable: vec!["e1".to_string()],
        },
    ];

    let commands = engine.evaluate(&snapshot).await;

    assert!(
        commands.iter().any(|c| matches!(
            c,
            OutboundCommand::Produce { queue, item, .. } if queue == "Building" && item == "powr"
        )),
        "expected a power-plant build, got {commands:?}"
    );
    assert!(
        !commands.iter().any(|c| matches!(c, OutboundCommand::Produce { queue, .. } if queue == "Infantry")),
        "infantry production should be blocked while power is negative, got {commands:?}"
    );
}

/// Scenario 3 (spec §8): a ground-attack squad formed from idle units
/// sweeps a remembered (building-sourced) enemy base when no enemy is
/// currently visible, stepping to the next ring point on a second fire.
#[tokio::test]
async fn fog_of_war_hunt_targets_centroid_then_steps_the_ring() {
    let doctrine = Doctrine {
        aggression: 0.5,
        ground_group_size: 3,
        ..Doctrine::default()
    };
    let engine = engine_with(&doctrine, Arc::new(RoleRegistry::new()), 3);

    let ground_units: Vec<OwnedUnit> = (0..3)
        .map(|i| OwnedUnit {
            id: i,
            type_code: "e1".to_string(),
            position: Position::default(),
            hp: 50.0,
            max_hp: 50.0,
            idle: true,
            cargo: 0,
        })
        .collect();

    // Tick 1: enough idle ground units to fully form the squad in one
    // shot, plus a building-sourced enemy sighting that seeds intel.
    let mut priming = base_snapshot(1);
    priming.units = ground_units.clone();
    priming.enemies = vec![EnemyUnit {
        id: 99,
        owner: "enemy".to_string(),
        type_code: "fact".to_string(),
        position: Position::new(500.0, 500.0),
        hp: 1000.0,
        max_hp: 1000.0,
        is_building: true,
    }];
    engine.evaluate(&priming).await;

    // Tick 2: fog of war — the enemy is no longer visible, but the squad
    // and the remembered intel both persist in engine memory.
    let mut fog = base_snapshot(2);
    fog.units = ground_units.clone();
    let first_hunt = engine.evaluate(&fog).await;
    let first_target = first_hunt.iter().find_map(|c| match c {
        OutboundCommand::AttackMove { x, y, .. } => Some((*x, *y)),
        _ => None,
    });
    assert_eq!(first_target, Some((500.0, 500.0)), "first hunt fire should target the remembered centroid");

    fog.tick = 3;
    let second_hunt = engine.evaluate(&fog).await;
    let second_target = second_hunt.iter().find_map(|c| match c {
        OutboundCommand::AttackMove { x, y, .. } => Some((*x, *y)),
        _ => None,
    });
    assert!(second_target.is_some(), "second fire should still hunt");
    assert_ne!(second_target, Some((500.0, 500.0)), "second fire should step off the centroid");
}

/// Scenario 4 (spec §8): the default doctrine, fully compiled through the
/// real rule engine, emits nothing and does not panic against an entirely
/// empty snapshot (no cash, no units, no buildings, no intel).
#[tokio::test]
async fn default_doctrine_against_empty_snapshot_emits_nothing() {
    let engine = engine_with(&Doctrine::default(), Arc::new(RoleRegistry::new()), 5);

    let commands = engine.evaluate(&base_snapshot(1)).await;

    assert!(commands.is_empty(), "expected no commands against an all-zero snapshot, got {commands:?}");
}

/// Scenario 5 (spec §8): swapping in a new doctrine changes which units a
/// snapshot produces commands for, without restarting the engine.
#[tokio::test]
async fn doctrine_swap_changes_production_posture() {
    let mut registry = RoleRegistry::new();
    registry.insert("aircraft", "Aircraft", ["yak".to_string()]);
    registry.insert("infantry", "Infantry", ["e1".to_string()]);
    let registry = Arc::new(registry);

    let engine = engine_with(&Doctrine::default(), registry.clone(), 4);

    let new_doctrine = Doctrine {
        air: 0.8,
        infantry: 0.0,
        ..Doctrine::default()
    };
    let new_rules = autarch_doctrine::compile(&new_doctrine, &registry);
    engine.swap(new_rules).await.expect("compiled doctrine always swaps cleanly");

    let mut snapshot = base_snapshot(1);
    snapshot.economy.cash = 1000.0;
    snapshot.economy.power_provided = 200.0;
    snapshot.economy.power_drained = 100.0;
    snapshot.production = vec![
        ProductionQueue {
            queue: "Aircraft".to_string(),
            current_item: None,
            progress: 0.0,
            buildable: vec!["yak".to_string()],
        },
        ProductionQueue {
            queue: "Infantry".to_string(),
            current_item: None,
            progress: 0.0,
            buildable: vec!["e1".to_string()],
        },
    ];

    let commands = engine.evaluate(&snapshot).await;

    assert!(
        commands
            .iter()
            .any(|c| matches!(c, OutboundCommand::Produce { queue, .. } if queue == "Aircraft")),
        "expected an aircraft production command, got {commands:?}"
    );
    assert!(
        !commands.iter().any(|c| matches!(c, OutboundCommand::Produce { queue, .. } if queue == "Infantry")),
        "infantry weight is zero post-swap, got {commands:?}"
    );
}
