pub mod api;
pub mod config;
pub mod service;
pub mod store;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tardigrade_core::{TransactionRecord, WalkConfig, WalkOverrides, WalkSimulator};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::service::WalkService;
use crate::store::{sort_by_block_time, JsonFileStore};

#[derive(Parser)]
#[command(name = "tardigrade")]
#[command(about = "Tardigrade - deterministic walk driven by on-chain swap activity")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the walk history over HTTP
    Serve {
        /// API port (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Transaction store JSON file (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Bind on all interfaces
        #[arg(long)]
        public: bool,
    },
    /// Compute the walk for a JSON array of transactions and print it
    Simulate {
        /// Input file path
        input: PathBuf,
        /// Print only the most recent step
        #[arg(long)]
        latest: bool,
        #[command(flatten)]
        walk: WalkOverrides,
    },
    /// Print the effective configuration
    Config,
}

fn serve(
    mut config: Config,
    port: Option<u16>,
    store: Option<PathBuf>,
    public: bool,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }
    if let Some(store) = store {
        config.store.path = Some(store);
    }
    config.api.public |= public;

    let store = JsonFileStore::new(config.store.file_path());
    info!(
        store = %store.path().display(),
        batch_size = config.walk.batch_size,
        read_timeout_secs = config.store.read_timeout_secs,
        "Starting tardigrade API"
    );

    let service = WalkService::new(store, &config.walk, config.store.read_timeout())?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(api::run_api_server(
        Arc::new(service),
        &config.api.bind_addr(),
    ))
}

fn simulate_file(input: &Path, latest: bool, walk: &WalkConfig) -> anyhow::Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading transactions from {}", input.display()))?;
    let mut transactions: Vec<TransactionRecord> =
        serde_json::from_str(&raw).context("parsing transaction records")?;
    sort_by_block_time(&mut transactions);

    let start = std::time::Instant::now();
    let history = WalkSimulator::new(walk)?.run(&transactions)?;
    let position = history.position();
    info!(
        transactions = transactions.len(),
        steps = history.len(),
        x = position.x,
        y = position.y,
        duration_secs = start.elapsed().as_secs_f64(),
        "Simulation Complete"
    );

    let json = if latest {
        serde_json::to_string_pretty(history.latest())?
    } else {
        serde_json::to_string_pretty(&history)?
    };
    println!("{}", json);
    Ok(())
}

/// Walk settings from the config file with command-line overrides on top.
fn resolve_walk(config: Config, overrides: &WalkOverrides) -> anyhow::Result<WalkConfig> {
    let mut walk = config.walk;
    overrides.apply(&mut walk)?;
    Ok(walk)
}

fn print_config(config: &Config) -> anyhow::Result<()> {
    let mut effective = config.clone();
    effective.store.path = Some(config.store.file_path());
    print!("{}", effective.to_toml()?);
    Ok(())
}

fn main() {
    // Initialize structured logging (stderr keeps stdout clean for `simulate`)
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            store,
            public,
        } => Config::load().and_then(|config| serve(config, port, store, public)),
        Commands::Simulate {
            input,
            latest,
            walk,
        } => Config::load().and_then(|config| {
            let walk = resolve_walk(config, &walk)?;
            simulate_file(&input, latest, &walk)
        }),
        Commands::Config => Config::load().and_then(|config| print_config(&config)),
    };

    if let Err(e) = result {
        error!(error = %format!("{:#}", e), "Fatal Error");
        std::process::exit(1);
    }
}
