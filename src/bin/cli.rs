//! seatrank CLI
//!
//! Single-run entry point: scrape the ranking page and persist the rows.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use seatrank::{
    error::Result,
    models::{Config, StorageBackend},
    pipeline,
    storage::{BlobStorage, DriveStorage, LocalStorage},
    utils::http,
};

/// seatrank - box-office seat-ranking tracker
#[derive(Parser, Debug)]
#[command(name = "seatrank", version, about = "Tracks a daily seat-sales ranking page into CSV logs")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the page and persist rows to the configured destination
    Run,

    /// Scrape the page and print the extracted rows without writing
    Preview,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("seatrank starting...");

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run => {
            config.validate()?;

            let client = http::create_async_client(&config.scrape)?;
            let storage: Box<dyn BlobStorage> = match config.storage.backend {
                StorageBackend::Drive => Box::new(DriveStorage::from_env(client.clone())?),
                StorageBackend::Local => Box::new(LocalStorage::new(&config.storage.local_dir)),
            };

            let summary = pipeline::run_scrape(&config, storage.as_ref(), &client).await?;

            log::info!(
                "Run complete: {} rows -> {}",
                summary.rows_extracted,
                summary.destination
            );
        }

        Command::Preview => {
            config.validate()?;

            let client = http::create_async_client(&config.scrape)?;
            let rows = pipeline::fetch_rows(&config, &client).await?;

            for row in &rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    row.rank,
                    row.seat_count,
                    row.screening_count,
                    row.house_average,
                    row.numbered_house,
                    row.venues_acquired,
                    row.venues_screening,
                    row.acquisition_rate,
                    row.title
                );
            }
            log::info!("Previewed {} rows (nothing written)", rows.len());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
