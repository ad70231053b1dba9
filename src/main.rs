//! My Library - terminal catalog manager

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use my_library::{
    cli::{self, Command, Opts},
    config::{AppConfig, LoggingConfig},
    AppState,
};

/// Logs go to stderr; stdout is the catalog view
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("my_library={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let opts = Opts::parse();
    let config = AppConfig::load()?.with_base_url(opts.base_url);

    init_tracing(&config.logging);

    tracing::debug!(
        "Starting My Library v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let state = AppState::new(config)?;
    let ok = cli::run(opts.command.unwrap_or(Command::Shell), &state).await?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
