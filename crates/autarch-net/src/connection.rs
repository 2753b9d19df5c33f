//! Per-connection handling: a read loop that deserializes envelopes and
//! dispatches them sequentially, plus the strategist task it launches on
//! `hello` and tears down when the connection ends.

use std::sync::Arc;

use autarch_core::doctrine::Doctrine;
use autarch_core::role::RoleRegistry;
use autarch_core::wire::{Ack, Envelope, Hello, InboundMessage, OutboundCommand};
use autarch_events::{derive_phase, EventDetector};
use autarch_rules::{RuleEngine, RuleSet};
use autarch_strategist::{LlmAdapter, Strategist, StrategistConfig};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use crate::codec::{read_envelope, write_envelope};
use crate::error::ConnectionError;

/// Per-connection knobs a caller (the accept loop) supplies; everything
/// the connection itself decides on is kept out of this struct.
pub struct ConnectionConfig {
    pub roles: Arc<RoleRegistry>,
    pub adapter: Arc<dyn LlmAdapter>,
    pub strategist: StrategistConfig,
    pub rng_seed: u64,
}

/// Drive one connection to completion: reads `hello`, starts the
/// strategist, then loops on `game_state` until EOF, an error, or
/// `cancel` fires. Connection-scoped errors propagate to the caller, which
/// logs and moves on — other connections are unaffected.
pub async fn handle_connection<S>(mut stream: S, config: ConnectionConfig, cancel: CancellationToken) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let hello = match read_envelope(&mut stream).await? {
        Some(env) if env.kind == "hello" => {
            serde_json::from_value::<Hello>(env.data).map_err(|e| ConnectionError::Framing(e.into()))?
        }
        Some(env) => return Err(ConnectionError::UnexpectedFirstMessage(env.kind)),
        None => return Err(ConnectionError::NoHello),
    };

    tracing::info!(player = %hello.player, faction = %hello.faction, "connection established");
    write_envelope(&mut stream, &Envelope::new("ack", Ack::ok()).unwrap()).await?;

    let bootstrap_rules = autarch_doctrine::compile(&Doctrine::default(), &config.roles);
    let initial = RuleSet::compile(bootstrap_rules).expect("doctrine-synthesized rules always compile");
    let engine = Arc::new(RuleEngine::new(config.roles.clone(), hello.faction.clone(), initial, config.rng_seed));

    let strategist = Strategist::new(
        engine.clone(),
        config.roles.clone(),
        hello.faction.clone(),
        config.adapter.clone(),
        config.strategist.clone(),
    );
    let strategist_cancel = cancel.child_token();
    let strategist_handle = tokio::spawn(strategist.clone().run(strategist_cancel.clone()));

    let mut detector = EventDetector::new();
    let result = read_loop(&mut stream, &engine, &strategist, &mut detector, &cancel).await;

    strategist_cancel.cancel();
    let _ = strategist_handle.await;
    tracing::info!(player = %hello.player, "connection closed");
    result
}

async fn read_loop<S>(
    stream: &mut S,
    engine: &Arc<RuleEngine>,
    strategist: &Arc<Strategist>,
    detector: &mut EventDetector,
    cancel: &CancellationToken,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let envelope = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            envelope = read_envelope(stream) => envelope?,
        };

        let Some(envelope) = envelope else {
            return Ok(());
        };

        match envelope.kind.as_str() {
            "hello" => {
                tracing::warn!("ignoring duplicate hello on an established connection");
            }
            "game_state" => {
                let snapshot = match serde_json::from_value(envelope.data) {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to deserialize game_state payload");
                        continue;
                    }
                };
                handle_game_state(stream, engine, strategist, detector, snapshot).await?;
            }
            other => {
                tracing::warn!(kind = other, "unknown message type");
            }
        }
    }
}

async fn handle_game_state<S>(
    stream: &mut S,
    engine: &Arc<RuleEngine>,
    strategist: &Arc<Strategist>,
    detector: &mut EventDetector,
    snapshot: Box<autarch_core::snapshot::Snapshot>,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let events = detector.detect(&snapshot);
    let phase = derive_phase(&snapshot);

    let commands = engine.evaluate(&snapshot).await;
    strategist.on_snapshot(*snapshot, phase, events);

    write_envelope(stream, &Envelope::new("ack", Ack::ok()).unwrap()).await?;
    for command in commands {
        send_command(stream, command).await?;
    }
    Ok(())
}

async fn send_command<S>(stream: &mut S, command: OutboundCommand) -> Result<(), ConnectionError>
where
    S: AsyncWrite + Unpin,
{
    let envelope = command.into_envelope().expect("OutboundCommand always serializes");
    write_envelope(stream, &envelope).await?;
    Ok(())
}

/// Re-exported so callers that only need the inbound payload shape (e.g.
/// a test harness) don't have to depend on `autarch-core` directly for it.
pub type Inbound = InboundMessage;

#[cfg(test)]
mod tests {
    use super::*;
    use autarch_core::snapshot::{Economy, MapDims, ProductionQueue};
    use autarch_strategist::NullAdapter;

    #[tokio::test]
    async fn hello_then_empty_game_state_acks_both_with_no_panic() {
        let (mut client, server) = tokio::io::duplex(64 * 1024);

        let config = ConnectionConfig {
            roles: Arc::new(RoleRegistry::new()),
            adapter: Arc::new(NullAdapter),
            strategist: StrategistConfig::default(),
            rng_seed: 1,
        };
        let cancel = CancellationToken::new();
        let server_task = tokio::spawn(handle_connection(server, config, cancel.clone()));

        let hello = Envelope::new(
            "hello",
            Hello {
                player: "p1".to_string(),
                faction: "soviet".to_string(),
                terrain: None,
            },
        )
        .unwrap();
        write_envelope(&mut client, &hello).await.unwrap();
        let ack = read_envelope(&mut client).await.unwrap().unwrap();
        assert_eq!(ack.kind, "ack");

        let snapshot = autarch_core::snapshot::Snapshot {
            tick: 1,
            economy: Economy::default(),
            units: vec![],
            buildings: vec![],
            production: vec![ProductionQueue::default()],
            enemies: vec![],
            capturables: vec![],
            support_powers: vec![],
            map: MapDims {
                width: 1000.0,
                height: 1000.0,
            },
            terrain: None,
        };
        let game_state = Envelope::new("game_state", &snapshot).unwrap();
        write_envelope(&mut client, &game_state).await.unwrap();
        let ack2 = read_envelope(&mut client).await.unwrap().unwrap();
        assert_eq!(ack2.kind, "ack");

        cancel.cancel();
        drop(client);
        let _ = server_task.await.unwrap();
    }
}
