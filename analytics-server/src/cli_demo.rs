use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jukebox_analytics_server::analytics::AnalyticsService;
use jukebox_analytics_server::analytics_store::{
    AnalyticsStore, InMemoryAnalyticsStore, SqliteAnalyticsStore, TrackId,
};
use jukebox_analytics_server::config::StoreBackend;

/// Plays a fixed sequence of tracks through the analytics service and prints the results.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Storage backend to run the demo against.
    #[clap(long, value_enum, default_value = "memory")]
    pub backend: StoreBackend,

    /// Path to the SQLite database file, required by the sqlite backend.
    #[clap(long)]
    pub db_path: Option<PathBuf>,
}

/// Track 4 does not exist and is rejected.
const PLAYED_TRACKS: [TrackId; 7] = [1, 1, 2, 3, 1, 2, 4];
const AMOUNT_PAID: f64 = 1.25;

fn open_store(args: &CliArgs) -> Result<Arc<dyn AnalyticsStore>> {
    Ok(match (args.backend, &args.db_path) {
        (StoreBackend::Memory, _) => Arc::new(InMemoryAnalyticsStore::new()),
        (StoreBackend::Sqlite, Some(path)) => Arc::new(SqliteAnalyticsStore::new(path)?),
        (StoreBackend::Sqlite, None) => bail!("--db-path is required with --backend sqlite"),
    })
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let service = AnalyticsService::new(open_store(&cli_args)?);
    info!("Running jukebox demo on {:?} backend", cli_args.backend);

    println!("Logging plays...");
    for track_id in PLAYED_TRACKS {
        match service.create_log(track_id, AMOUNT_PAID) {
            Ok(()) => println!("  track {}: logged", track_id),
            Err(err) => println!("  track {}: {}", track_id, err),
        }
    }

    println!("\nTop tracks:");
    match service.get_top_tracks() {
        Ok(top) => {
            for (rank, stat) in top.iter().enumerate() {
                println!("  {}. {} ({} plays)", rank + 1, stat.title, stat.count);
            }
        }
        Err(err) => println!("  {}", err),
    }

    println!("\nUpdating price of track 1...");
    for new_price in [0.0, 1.35] {
        match service.update_price(1, new_price) {
            Ok(()) => println!("  {:.2}: updated", new_price),
            Err(err) => println!("  {:.2}: {}", new_price, err),
        }
    }

    let track = service.get_track(1)?;
    println!("\n{} now costs {:.2}", track.title, track.price);

    Ok(())
}
