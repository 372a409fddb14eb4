//! Availability scraper CLI
//!
//! Local execution entry point. For AWS Lambda, use `availability-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use availability::{
    error::Result,
    models::{AvailabilityStatus, CabinClass, Config, Snapshot},
    pipeline,
    services::RunOptions,
    storage::{LocalStorage, SnapshotReader, SnapshotStore},
};
use clap::{Parser, Subcommand};

/// Asuka III cabin availability scraper
#[derive(Parser, Debug)]
#[command(
    name = "availability",
    version,
    about = "Scrapes cruise cabin availability into a JSON snapshot"
)]
struct Cli {
    /// Path to storage directory containing config.toml and the snapshot
    #[arg(short, long, default_value = "data")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every voyage and merge the results into the snapshot
    Scrape {
        /// Scrape without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the current snapshot as JSON
    Show,

    /// Validate configuration and the bundled snapshot
    Validate,

    /// Show current snapshot info
    Info,

    /// Serve the read endpoint and the scrape trigger over HTTP
    #[cfg(feature = "serve")]
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
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

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();

    let storage = LocalStorage::with_file_name(&cli.storage_dir, &config.storage.snapshot_file);

    match cli.command {
        Command::Scrape { dry_run } => {
            config.validate()?;
            let options = RunOptions {
                verbose: cli.verbose,
                persist: !dry_run,
            };
            let summary = pipeline::run_scrape(&config, &storage, options).await?;
            log::info!("{}", summary.message);

            if dry_run && summary.updated {
                println!("{}", summary.snapshot.to_json_pretty()?);
            }
        }

        Command::Show => {
            let reader = SnapshotReader::new(Arc::new(storage));
            let snapshot = reader.read().await;
            print!("{}", snapshot.to_json_pretty()?);
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
        }

        Command::Info => {
            log::info!("Storage: {}", storage.location());
            let snapshot = match storage.load().await? {
                Some(snapshot) => snapshot,
                None => {
                    log::info!("No snapshot found yet, showing the bundled one.");
                    Snapshot::bundled()
                }
            };
            print_info(&snapshot);
        }

        #[cfg(feature = "serve")]
        Command::Serve { addr } => {
            use availability::{auth::TriggerAuth, http};

            let state = http::AppState::new(config, Arc::new(storage), TriggerAuth::from_env());
            let app = http::create_router(state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            log::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_info(snapshot: &Snapshot) {
    match snapshot.last_updated_at() {
        Some(at) => {
            let age = chrono::Utc::now() - at;
            log::info!(
                "Last updated: {} ({}h ago)",
                snapshot.last_updated,
                age.num_hours()
            );
        }
        None => log::info!("Last updated: never"),
    }
    log::info!("Voyages: {}", snapshot.voyage_count());

    for class in [CabinClass::Penthouse, CabinClass::Suite, CabinClass::Balcony] {
        let mut counts = [0usize; 3];
        let statuses = snapshot
            .cruises
            .values()
            .flat_map(|availability| availability.iter())
            .filter(|(category, _)| category.class() == class)
            .map(|(_, status)| status);
        for status in statuses {
            let idx = match status {
                AvailabilityStatus::Available => 0,
                AvailabilityStatus::Waitlist => 1,
                AvailabilityStatus::SoldOut => 2,
            };
            counts[idx] += 1;
        }
        log::info!(
            "{:?}: {} available, {} waitlist, {} sold out",
            class,
            counts[0],
            counts[1],
            counts[2]
        );
    }
}
