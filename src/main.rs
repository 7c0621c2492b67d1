//! SightReadPro - Entry Point
//!
//! Command-line front end for the progression engine: show progress, record
//! a completed exercise, or probe the practice server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sightreadpro::api::{ApiClient, HealthCheck, OfflineSubmitter, PerformanceSubmitter};
use sightreadpro::{
    Config, JsonProfileStorage, PerformanceEvent, PracticeEngine, ProgressStore, SystemClock,
};

#[derive(Debug, Parser)]
#[command(name = "sightreadpro")]
#[command(about = "Daily sight-reading practice progress", long_about = None)]
struct Cli {
    /// RON config file
    #[arg(long, global = true, env = "SIGHTREADPRO_CONFIG")]
    config: Option<PathBuf>,

    /// Profile to use
    #[arg(long, global = true)]
    user: Option<String>,

    /// Practice server base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Do not contact the server
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current progress report
    Status,
    /// Record a completed exercise
    Complete {
        #[arg(long)]
        exercise: i64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        mistakes: i64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        seconds: i64,
        #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
        xp: i64,
    },
    /// Check whether the practice server answers
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(user) = cli.user {
        config.user_id = user;
    }
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    config.offline |= cli.offline;

    log::info!("Starting SightReadPro v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(
        ApiClient::new(&config.api_base_url, config.request_timeout())
            .context("failed to build HTTP client")?,
    );

    match cli.command {
        Command::Health => {
            let reachable = client.is_server_reachable().await;
            println!(
                "{} is {}",
                client.base_url(),
                if reachable { "reachable" } else { "unreachable" }
            );
        }
        Command::Status => {
            let engine = build_engine(&config, client)?;
            let report = engine.report();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Complete { exercise, mistakes, seconds, xp } => {
            let event = PerformanceEvent::from_raw(exercise, mistakes, seconds, xp)
                .context("invalid exercise result")?;
            let engine = build_engine(&config, client)?;
            let outcome = engine.complete(event).await?;

            if let Some(e) = &outcome.persist_error {
                eprintln!("Warning: progress not saved: {}", e);
            }
            println!("{}", outcome.grade.message());
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn build_engine(config: &Config, client: Arc<ApiClient>) -> Result<PracticeEngine> {
    let storage = Arc::new(match &config.data_dir {
        Some(dir) => JsonProfileStorage::new(dir),
        None => JsonProfileStorage::in_data_dir(),
    });
    let store = ProgressStore::open(storage, &config.user_id)
        .with_context(|| format!("failed to open profile {:?}", config.user_id))?;

    let submitter: Arc<dyn PerformanceSubmitter> = if config.offline {
        Arc::new(OfflineSubmitter)
    } else {
        client.clone()
    };

    Ok(PracticeEngine::new(
        Arc::new(store),
        submitter,
        Arc::new(SystemClock::new(config.day_boundary)),
    )
    .with_submit_timeout(config.request_timeout())
    .with_health_check(client))
}
