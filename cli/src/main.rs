// ABOUTME: Command-line runner for a ring of agents sharing adjacent resources.
// ABOUTME: Loads config from file, env, and flags, then runs the coordinator until done.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ringdine::prelude::*;

const DEFAULT_CONFIG_FILE: &str = "ringdine.json";

/// Run N agents around a ring of N shared resources, then shut them down.
#[derive(Parser, Debug)]
#[command(name = "ringdine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file (defaults to ./ringdine.json if present)
    #[arg(short, long, env = "RINGDINE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of agents in the ring
    #[arg(short, long, env = "RINGDINE_AGENTS")]
    agents: Option<usize>,

    /// How long agents run before cancellation, in milliseconds
    #[arg(short, long, env = "RINGDINE_DURATION_MS")]
    duration_ms: Option<u64>,

    /// Seed for think/eat durations
    #[arg(short, long, env = "RINGDINE_SEED")]
    seed: Option<u64>,

    /// Upper bound for a thinking hold, in milliseconds
    #[arg(long, env = "RINGDINE_MAX_THINK_MS")]
    max_think_ms: Option<u64>,

    /// Upper bound for an eating hold, in milliseconds
    #[arg(long, env = "RINGDINE_MAX_EAT_MS")]
    max_eat_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RINGDINE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let config = load_config(&cli)?;
    config.validate().context("Invalid configuration")?;

    let coordinator = Coordinator::new(config);
    let report = coordinator
        .run_with_cancel(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping agents");
            } else {
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("Run failed")?;

    print!("{}", report);
    Ok(())
}

/// Start from the config file, then apply flag and env overrides.
fn load_config(cli: &Cli) -> Result<DiningConfig> {
    let mut config = match find_config(cli) {
        Some(path) => DiningConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DiningConfig::default(),
    };

    if let Some(agents) = cli.agents {
        config = config.with_agent_count(agents);
    }
    if let Some(ms) = cli.duration_ms {
        config = config.with_run_duration(Duration::from_millis(ms));
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = cli.max_think_ms {
        config = config.with_max_think(Duration::from_millis(ms));
    }
    if let Some(ms) = cli.max_eat_ms {
        config = config.with_max_eat(Duration::from_millis(ms));
    }

    Ok(config)
}

fn find_config(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    Ok(())
}
