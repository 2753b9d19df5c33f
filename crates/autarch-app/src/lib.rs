//! Process bootstrap: CLI parsing, role-data loading, the accept loop, and
//! graceful shutdown. Everything downstream of "accept one connection" is
//! `autarch-net`'s job; this crate only wires the pieces together the way
//! spec.md §6/§7 describes the process interface and error tiers.

pub mod cli;
pub mod roles;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use autarch_core::role::RoleRegistry;
use autarch_net::ConnectionConfig;
use autarch_strategist::{LlmAdapter, NullAdapter, StrategistConfig};
use tokio::net::{TcpListener, UnixListener};
use tokio_util::sync::CancellationToken;

pub use cli::Cli;

/// Run the sidecar to completion: bind the listener, accept connections
/// until shutdown is requested, and return the process exit code spec.md
/// §6 specifies (0 on signal-initiated shutdown, 1 on bind failure).
pub async fn run(cli: Cli) -> ExitCode {
    let roles = match load_roles(&cli) {
        Ok(roles) => Arc::new(roles),
        Err(err) => {
            tracing::error!(error = %err, "failed to load role registry");
            return ExitCode::FAILURE;
        }
    };

    let adapter: Arc<dyn LlmAdapter> = Arc::new(NullAdapter);
    let strategist_config = StrategistConfig {
        interval_ticks: cli.strategist_interval_ticks,
        react_to_events: !cli.no_event_triggers,
        directive: cli.directive.clone(),
    };

    let cancel = CancellationToken::new();
    shutdown_on_signal(cancel.clone());

    match &cli.tcp {
        Some(addr) => run_tcp(addr, roles, adapter, strategist_config, cli.rng_seed, cancel).await,
        None => run_unix(&cli.socket_path, roles, adapter, strategist_config, cli.rng_seed, cancel).await,
    }
}

async fn run_unix(
    socket_path: &Path,
    roles: Arc<RoleRegistry>,
    adapter: Arc<dyn LlmAdapter>,
    strategist_config: StrategistConfig,
    rng_seed: u64,
    cancel: CancellationToken,
) -> ExitCode {
    // Removed on start so a prior unclean exit's stale socket file doesn't
    // block rebind; removed again on clean shutdown below.
    if socket_path.exists() {
        if let Err(err) = std::fs::remove_file(socket_path) {
            tracing::error!(error = %err, path = %socket_path.display(), "failed to remove stale socket");
            return ExitCode::FAILURE;
        }
    }

    let listener = match UnixListener::bind(socket_path) {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, path = %socket_path.display(), "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(path = %socket_path.display(), "listening");

    accept_loop(
        || async { listener.accept().await.map(|(stream, _)| stream) },
        roles,
        adapter,
        strategist_config,
        rng_seed,
        cancel,
    )
    .await;

    let _ = std::fs::remove_file(socket_path);
    ExitCode::SUCCESS
}

async fn run_tcp(
    addr: &str,
    roles: Arc<RoleRegistry>,
    adapter: Arc<dyn LlmAdapter>,
    strategist_config: StrategistConfig,
    rng_seed: u64,
    cancel: CancellationToken,
) -> ExitCode {
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(addr, "listening");

    accept_loop(
        || async { listener.accept().await.map(|(stream, _)| stream) },
        roles,
        adapter,
        strategist_config,
        rng_seed,
        cancel,
    )
    .await;

    ExitCode::SUCCESS
}

/// Accept connections until `cancel` fires, spawning one task per
/// connection. Each connection's own errors are connection-scoped: logged
/// and dropped without affecting the accept loop or any other connection.
async fn accept_loop<F, Fut, S>(
    mut accept: F,
    roles: Arc<RoleRegistry>,
    adapter: Arc<dyn LlmAdapter>,
    strategist_config: StrategistConfig,
    rng_seed: u64,
    cancel: CancellationToken,
) where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::io::Result<S>>,
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    let mut next_seed = rng_seed;
    loop {
        let stream = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("shutdown requested, no longer accepting connections");
                return;
            }
            result = accept() => match result {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to accept connection");
                    continue;
                }
            },
        };

        let config = ConnectionConfig {
            roles: roles.clone(),
            adapter: adapter.clone(),
            strategist: strategist_config.clone(),
            rng_seed: next_seed,
        };
        // Every connection gets a distinct seed derived from the base one,
        // so placement/hunt heuristics differ across simultaneous players
        // without losing per-connection reproducibility at a fixed seed.
        next_seed = next_seed.wrapping_add(0x9E3779B97F4A7C15);

        let conn_cancel = cancel.child_token();
        tokio::spawn(async move {
            if let Err(err) = autarch_net::handle_connection(stream, config, conn_cancel).await {
                tracing::warn!(error = %err, "connection terminated");
            }
        });
    }
}

/// Cancel `token` on SIGINT/SIGTERM (or just Ctrl-C on platforms without
/// SIGTERM), propagating from the accept loop to every connection's
/// strategist per spec.md §5's cancellation model.
fn shutdown_on_signal(token: CancellationToken) {
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("shutdown signal received");
        token.cancel();
    });
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    tokio::select! {
        _ = sigterm.recv() => {}
        _ = sigint.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Load the role registry from `--roles <path>` if given, otherwise start
/// with an empty registry. The catalogue of game-specific type codes is
/// data, not design (spec.md §1): this process never embeds a hard-coded
/// faction table, it only knows how to parse one.
fn load_roles(cli: &Cli) -> Result<RoleRegistry, RolesError> {
    match &cli.roles_path {
        Some(path) => roles::load_from_path(path),
        None => {
            tracing::warn!("no --roles file given; starting with an empty role registry");
            Ok(RoleRegistry::new())
        }
    }
}

pub use roles::RolesError;
