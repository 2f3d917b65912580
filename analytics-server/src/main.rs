use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jukebox_analytics_server::analytics::AnalyticsService;
use jukebox_analytics_server::analytics_store::{
    AnalyticsStore, InMemoryAnalyticsStore, SqliteAnalyticsStore,
};
use jukebox_analytics_server::config::{self, StoreBackend};
use jukebox_analytics_server::rpc::serve_grpc;
use jukebox_analytics_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Storage backend for tracks and playback logs.
    #[clap(long, value_enum, default_value = "memory")]
    pub backend: StoreBackend,

    /// Path to the SQLite database file, required by the sqlite backend.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// The address both transports bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// The HTTP port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The gRPC port to listen on.
    #[clap(long, default_value_t = 50051)]
    pub grpc_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            backend: args.backend,
            db_path: args.db_path.clone(),
            bind_address: args.bind_address.clone(),
            port: args.port,
            grpc_port: args.grpc_port,
            logging_level: args.logging_level.clone(),
        }
    }
}

fn open_store(app_config: &config::AppConfig) -> Result<Arc<dyn AnalyticsStore>> {
    match (app_config.backend, &app_config.db_path) {
        (StoreBackend::Sqlite, Some(db_path)) => {
            info!("Opening SQLite analytics database at {:?}...", db_path);
            Ok(Arc::new(SqliteAnalyticsStore::new(db_path)?))
        }
        (StoreBackend::Sqlite, None) => anyhow::bail!("sqlite backend selected without db_path"),
        (StoreBackend::Memory, _) => {
            info!("Using in-memory analytics store, data is lost on exit");
            Ok(Arc::new(InMemoryAnalyticsStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  backend: {:?}", app_config.backend);
    info!("  db_path: {:?}", app_config.db_path);
    info!("  port: {}", app_config.port);
    info!("  grpc_port: {}", app_config.grpc_port);

    let store = open_store(&app_config)?;
    let service = Arc::new(AnalyticsService::new(store));
    let grpc_addr = app_config.grpc_addr()?;
    let grpc_service = service.clone();

    info!(
        "Ready to serve HTTP at port {} and gRPC at port {}!",
        app_config.port, app_config.grpc_port
    );

    tokio::select! {
        result = run_server(app_config.server_config(), service) => {
            info!("HTTP server stopped: {:?}", result);
            result
        },
        result = serve_grpc(grpc_service, grpc_addr) => {
            info!("gRPC server stopped: {:?}", result);
            result
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        },
    }
}
