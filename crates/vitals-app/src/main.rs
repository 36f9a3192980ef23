//! Vitals application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Open the fixture-backed health store
//! 3. Answer the query given on the command line, or each stdin line
//!
//! Answers are printed to stdout; logs go to stderr.

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use vitals_chat::{AssistantConfig, HealthAssistant};
use vitals_core::config::VitalsConfig;
use vitals_health::{FixtureHealthStore, HealthFixture, HealthStore};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = VitalsConfig::load_or_default(&config_file);
    let log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Vitals v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Store.
    let fixture_path = args.resolve_fixture_path(&config.store.fixture_path);
    let store = match FixtureHealthStore::load(&fixture_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(
                path = %fixture_path.display(),
                error = %e,
                "Failed to load health fixture, answering from an empty store"
            );
            FixtureHealthStore::new(HealthFixture::default())
        }
    };
    let store: Arc<dyn HealthStore> = Arc::new(store);

    // Assistant.
    let mut assistant_config = AssistantConfig::from(&config);
    assistant_config.week_start = args.resolve_week_start(assistant_config.week_start);
    tracing::info!(week_start = ?assistant_config.week_start, "Health assistant ready");
    let assistant = HealthAssistant::new(store, &assistant_config);

    if let Some(query) = args.query() {
        let answer = assistant.answer(&query, &chrono::Local::now()).await;
        println!("{answer}");
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let answer = assistant.answer(&line, &chrono::Local::now()).await;
        println!("{answer}");
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}
