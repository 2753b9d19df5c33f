use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = autarch::Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_new(&cli.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    autarch::run(cli).await
}
