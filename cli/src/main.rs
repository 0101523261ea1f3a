use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use kingpin_orders::OrderService;
use kingpin_storage::MemoryStore;

mod commands;
mod config;

use commands::Command;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "kingpin", about = "Bowling tournament orders")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file, overriding the configured one
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data) = &cli.data {
        config.storage.snapshot_path = data.to_string_lossy().into_owned();
    }

    kingpin_orders::init_tracing(&config.log_level);
    debug!("Using snapshot {}", config.storage.snapshot_path);

    let store = Arc::new(MemoryStore::open(&config.storage).await?);
    let service = OrderService::new(store.clone());

    let is_write = cli.command.is_write();
    let value = commands::execute(&service, cli.command).await?;

    if is_write {
        store.persist(&config.storage.snapshot_path).await?;
    }

    Ok(serde_json::to_string_pretty(&value)?)
}
