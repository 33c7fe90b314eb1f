//! Trestle CLI
//!
//! Triggers Jenkins builds and follows them to completion from the command
//! line. Logs go to stderr; stdout carries build console output.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trestle")]
#[command(about = "Trigger Jenkins builds and wait for them", long_about = None)]
struct Cli {
    /// Jenkins controller URL
    #[arg(long, env = "JENKINS_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Credentials as USER:TOKEN
    #[arg(long, env = "JENKINS_CREDENTIALS", hide_env_values = true)]
    credentials: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trestle_cli=info,trestle_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        jenkins_url: cli.url,
        credentials: cli.credentials,
    };
    config.validate()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping");
            on_interrupt.cancel();
        }
    });

    handle_command(cli.command, &config, &cancel).await
}
