//! Background scheduler: a single-slot coalescing signal wakes one task
//! per connection, which summarizes the latest snapshot, asks the LLM
//! adapter for a doctrine, and hot-swaps the rule engine on success.

use std::sync::{Arc, Mutex};

use autarch_core::constants::STRATEGIST_DEFAULT_INTERVAL_TICKS;
use autarch_core::doctrine::Doctrine;
use autarch_core::role::RoleRegistry;
use autarch_core::snapshot::Snapshot;
use autarch_events::{GameEvent, GamePhase};
use autarch_rules::RuleEngine;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::adapter::LlmAdapter;
use crate::summary::summarize;

#[derive(Debug, Clone)]
pub struct StrategistConfig {
    /// Ticks between routine re-evaluations; an urgent event bypasses this.
    pub interval_ticks: u64,
    /// Whether event-detector urgent signals are honored at all (a fixed
    /// interval-only cadence is occasionally useful for reproducible demos).
    pub react_to_events: bool,
    /// Fixed instruction text sent to the LLM adapter alongside the
    /// summary; not a per-request configurable in spec.md, but it has to
    /// live somewhere, and process bootstrap is that place.
    pub directive: String,
}

impl Default for StrategistConfig {
    fn default() -> Self {
        Self {
            interval_ticks: STRATEGIST_DEFAULT_INTERVAL_TICKS,
            react_to_events: true,
            directive: "Balance economy and military posture against the observed enemy.".to_string(),
        }
    }
}

struct Pending {
    snapshot: Snapshot,
    phase: GamePhase,
    events_since_last: Vec<GameEvent>,
}

/// Owns the wake signal and the latest snapshot for one connection's
/// strategist task. Shared between the read loop (which feeds it snapshots
/// and events) and its own background task (which drains the signal).
pub struct Strategist {
    config: StrategistConfig,
    engine: Arc<RuleEngine>,
    roles: Arc<RoleRegistry>,
    faction: String,
    adapter: Arc<dyn LlmAdapter>,
    notify: Notify,
    pending: Mutex<Option<Pending>>,
    last_evaluation_tick: Mutex<Option<u64>>,
}

impl Strategist {
    pub fn new(
        engine: Arc<RuleEngine>,
        roles: Arc<RoleRegistry>,
        faction: String,
        adapter: Arc<dyn LlmAdapter>,
        config: StrategistConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            engine,
            roles,
            faction,
            adapter,
            notify: Notify::new(),
            pending: Mutex::new(None),
            last_evaluation_tick: Mutex::new(None),
        })
    }

    /// Feed the strategist the latest snapshot and the phase/events derived
    /// from it this tick. Non-blocking: replaces any not-yet-consumed
    /// pending snapshot rather than queuing (the "coalesced" signal).
    pub fn on_snapshot(&self, snapshot: Snapshot, phase: GamePhase, events: Vec<GameEvent>) {
        let tick = snapshot.tick;
        let urgent = self.config.react_to_events && events.iter().any(GameEvent::is_urgent);

        let due = {
            let last = *self.last_evaluation_tick.lock().unwrap();
            match last {
                None => true,
                Some(last) => tick.saturating_sub(last) >= self.config.interval_ticks,
            }
        };

        {
            let mut pending = self.pending.lock().unwrap();
            let events_since_last = match pending.take() {
                Some(prev) => {
                    let mut merged = prev.events_since_last;
                    merged.extend(events);
                    merged
                }
                None => events,
            };
            *pending = Some(Pending {
                snapshot,
                phase,
                events_since_last,
            });
        }

        if due || urgent {
            self.notify.notify_one();
        }
    }

    /// Run until `cancel` fires. Intended to be `tokio::spawn`ed once per
    /// connection, starting at `hello`, and aborted when the connection's
    /// read loop ends.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = self.notify.notified() => {
                    if cancel.is_cancelled() {
                        return;
                    }
                    self.evaluate_once(&cancel).await;
                }
            }
        }
    }

    async fn evaluate_once(&self, cancel: &CancellationToken) {
        let pending = self.pending.lock().unwrap().take();
        let Some(pending) = pending else { return };

        let summary = summarize(&pending.snapshot, pending.phase, pending.events_since_last);
        let tick = pending.snapshot.tick;

        let request = self.adapter.request_doctrine(&self.config.directive, &summary, &self.faction);
        let raw = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(tick, "strategist request cancelled");
                return;
            }
            result = request => result,
        };

        let doctrine = match raw {
            Ok(doctrine) => doctrine.validate(),
            Err(err) => {
                tracing::warn!(tick, error = %err, "llm request failed, keeping previous doctrine");
                return;
            }
        };

        self.apply(doctrine, tick).await;
    }

    async fn apply(&self, doctrine: Doctrine, tick: u64) {
        let rules = autarch_doctrine::compile(&doctrine, &self.roles);
        match self.engine.swap(rules).await {
            Ok(()) => {
                tracing::info!(tick, doctrine = %doctrine.name, "applied new doctrine");
                *self.last_evaluation_tick.lock().unwrap() = Some(tick);
            }
            Err(err) => {
                tracing::warn!(tick, error = %err, "compiled doctrine rejected, keeping previous rule set");
            }
        }
    }
}
