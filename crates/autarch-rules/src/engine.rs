//! The rule engine: owns the current rule set, engine memory, and the
//! per-connection RNG, and runs one tick's worth of housekeeping and rule
//! evaluation (spec.md §4.2).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use autarch_core::constants::IDLE_DIAGNOSTIC_INTERVAL_TICKS;
use autarch_core::memory::EngineMemory;
use autarch_core::role::RoleRegistry;
use autarch_core::snapshot::Snapshot;
use autarch_core::wire::OutboundCommand;
use autarch_env::Environment;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::RwLock;

use crate::error::CompileError;
use crate::ruleset::RuleSet;
use crate::types::ActionContext;

/// Owns the hot-swappable rule set and the state that survives across
/// swaps. Cheap to clone (an `Arc` around the shared parts); intended to be
/// shared between a connection's read-loop task and its strategist task.
pub struct RuleEngine {
    rules: Arc<RwLock<RuleSet>>,
    memory: Mutex<EngineMemory>,
    rng: Mutex<ChaCha8Rng>,
    roles: Arc<RoleRegistry>,
    faction: String,
}

impl RuleEngine {
    pub fn new(roles: Arc<RoleRegistry>, faction: String, initial: RuleSet, seed: u64) -> Self {
        Self {
            rules: Arc::new(RwLock::new(initial)),
            memory: Mutex::new(EngineMemory::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            roles,
            faction,
        }
    }

    /// Compile `candidate` and, on success, atomically replace the running
    /// rule set. On failure the current set keeps running and the error is
    /// returned. Squad memory is cleared on a successful swap: a new
    /// doctrine may use different squad names or sizes.
    pub async fn swap(&self, candidate: Vec<crate::rule::Rule>) -> Result<(), CompileError> {
        let compiled = RuleSet::compile(candidate)?;
        {
            let mut rules = self.rules.write().await;
            *rules = compiled;
        }
        self.memory.lock().unwrap().clear_squads();
        Ok(())
    }

    /// Run one tick: housekeeping passes, then priority-ordered rule
    /// evaluation with category exclusivity. Never panics on a single
    /// rule's failure; per-rule errors are logged and skipped.
    pub async fn evaluate(&self, snapshot: &Snapshot) -> Vec<OutboundCommand> {
        let rules = self.rules.read().await;
        let mut memory = self.memory.lock().unwrap();
        let mut rng = self.rng.lock().unwrap();

        run_housekeeping(snapshot, &mut memory);

        let mut commands = Vec::new();
        let mut fired_categories: HashSet<_> = HashSet::new();
        let mut any_fired = false;

        for rule in rules.rules() {
            if fired_categories.contains(&rule.category) {
                continue;
            }

            let env = Environment::new(snapshot, &memory, &self.roles, &self.faction);
            let matched = (rule.condition)(&env);
            drop(env);

            if !matched {
                continue;
            }

            let mut ctx = ActionContext {
                snapshot,
                roles: &self.roles,
                faction: &self.faction,
                memory: &mut memory,
                rng: &mut rng,
                tick: snapshot.tick,
            };
            match (rule.action)(&mut ctx) {
                Ok(mut emitted) => {
                    if !emitted.is_empty() {
                        any_fired = true;
                        if rule.exclusive {
                            fired_categories.insert(rule.category);
                        }
                    }
                    commands.append(&mut emitted);
                }
                Err(err) => {
                    tracing::warn!(rule = %rule.name, error = %err, "rule action failed");
                }
            }
        }

        if !any_fired {
            let last = memory.last_idle_diagnostic_tick;
            if snapshot.tick.saturating_sub(last) >= IDLE_DIAGNOSTIC_INTERVAL_TICKS {
                tracing::info!(tick = snapshot.tick, "no rule fired this tick");
                memory.last_idle_diagnostic_tick = snapshot.tick;
            }
        } else {
            memory.last_rule_fired_tick = snapshot.tick;
        }

        commands
    }

    /// Number of rules in the currently active set.
    pub async fn active_rule_count(&self) -> usize {
        self.rules.read().await.len()
    }
}

/// Pre-evaluation housekeeping, run once per tick before any rule
/// conditions are checked (spec.md §4.2 step 3).
fn run_housekeeping(snapshot: &Snapshot, memory: &mut EngineMemory) {
    update_enemy_intel(snapshot, memory);
    update_built_roles(snapshot, memory);
    update_squads(snapshot, memory);
}

fn update_enemy_intel(snapshot: &Snapshot, memory: &mut EngineMemory) {
    for enemy in &snapshot.enemies {
        memory.update_intel(
            &enemy.owner,
            enemy.position.x,
            enemy.position.y,
            snapshot.tick,
            enemy.is_building,
        );
    }
}

fn update_built_roles(snapshot: &Snapshot, memory: &mut EngineMemory) {
    for building in &snapshot.buildings {
        memory.mark_built(&building.type_code);
    }
}

/// Drop dead units from every squad roster, then dissolve any squad left
/// with no members (purging its auxiliary hunt-state key too).
fn update_squads(snapshot: &Snapshot, memory: &mut EngineMemory) {
    let alive: HashSet<u32> = snapshot.units.iter().map(|u| u.id).collect();

    for squad in memory.squads.values_mut() {
        squad.members.retain(|id| alive.contains(id));
    }

    let empty: Vec<String> = memory
        .squads
        .iter()
        .filter(|(_, squad)| squad.is_empty())
        .map(|(name, _)| name.clone())
        .collect();

    for name in empty {
        memory.dissolve_squad(&name);
    }

    memory.retreating_units.retain(|id, _| alive.contains(id));
}
