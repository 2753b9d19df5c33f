//! Process bootstrap configuration. Deliberately thin: spec.md §1 keeps
//! command-line parsing out of the "hard core", so this struct is read
//! once at startup and never touched again.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "autarch", about = "Sidecar decision engine for an RTS game host", version)]
pub struct Cli {
    /// Unix domain socket path to listen on. Ignored if `--tcp` is given.
    #[arg(long, default_value = "/tmp/autarch.sock")]
    pub socket_path: PathBuf,

    /// Listen on a TCP address instead of a Unix socket (e.g. for test
    /// harnesses that prefer loopback TCP over a socket file).
    #[arg(long)]
    pub tcp: Option<String>,

    /// Path to a JSON role-registry file (role name -> queue + type
    /// codes). The catalogue of game-specific type codes is data, not
    /// design: without this flag the process starts with an empty
    /// registry and every role-gated rule simply never fires.
    #[arg(long)]
    pub roles_path: Option<PathBuf>,

    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or
    /// "autarch=debug,autarch_rules=trace".
    #[arg(long, default_value = "info")]
    pub log_filter: String,

    /// Ticks between routine strategist re-evaluations.
    #[arg(long, default_value_t = autarch_core::constants::STRATEGIST_DEFAULT_INTERVAL_TICKS)]
    pub strategist_interval_ticks: u64,

    /// Disable early strategist re-evaluation on event-detector triggers,
    /// falling back to a fixed interval-only cadence (useful for
    /// reproducible demos).
    #[arg(long)]
    pub no_event_triggers: bool,

    /// Fixed instruction text sent to the LLM adapter alongside each
    /// strategy summary.
    #[arg(long, default_value = "Balance economy and military posture against the observed enemy.")]
    pub directive: String,

    /// Base RNG seed; each accepted connection derives its own seed from
    /// this one so placement/hunt heuristics stay reproducible per run.
    #[arg(long, default_value_t = 0)]
    pub rng_seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_from_bare_program_name() {
        let cli = Cli::parse_from(["autarch"]);
        assert_eq!(cli.socket_path, PathBuf::from("/tmp/autarch.sock"));
        assert!(cli.tcp.is_none());
        assert_eq!(cli.log_filter, "info");
        assert!(!cli.no_event_triggers);
    }

    #[test]
    fn tcp_flag_overrides_socket_mode() {
        let cli = Cli::parse_from(["autarch", "--tcp", "127.0.0.1:9000"]);
        assert_eq!(cli.tcp.as_deref(), Some("127.0.0.1:9000"));
    }
}
