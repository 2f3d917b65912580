mod file_config;

pub use file_config::FileConfig;

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which `AnalyticsStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Memory,
    Sqlite,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub backend: StoreBackend,
    pub db_path: Option<PathBuf>,
    pub bind_address: String,
    pub port: u16,
    pub grpc_port: u16,
    pub logging_level: RequestsLoggingLevel,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: StoreBackend,
    /// Set if and only if `backend` is `Sqlite`.
    pub db_path: Option<PathBuf>,
    pub bind_address: String,
    pub port: u16,
    pub grpc_port: u16,
    pub logging_level: RequestsLoggingLevel,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let backend = match file.backend {
            Some(s) => StoreBackend::from_str(&s, true)
                .map_err(|_| anyhow::anyhow!("Unknown backend '{}', expected memory or sqlite", s))?,
            None => cli.backend,
        };

        let db_path = match backend {
            StoreBackend::Memory => None,
            StoreBackend::Sqlite => {
                let db_path = file
                    .db_path
                    .map(PathBuf::from)
                    .or_else(|| cli.db_path.clone())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "db_path must be specified via --db-path or in config file for the sqlite backend"
                        )
                    })?;
                if db_path.is_dir() {
                    bail!("db_path is a directory: {:?}", db_path);
                }
                if let Some(parent) = db_path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        bail!("Database directory does not exist: {:?}", parent);
                    }
                }
                Some(db_path)
            }
        };

        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());
        let port = file.port.unwrap_or(cli.port);
        let grpc_port = file.grpc_port.unwrap_or(cli.grpc_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        Ok(Self {
            backend,
            db_path,
            bind_address,
            port,
            grpc_port,
            logging_level,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            bind_address: self.bind_address.clone(),
            port: self.port,
        }
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.grpc_port)
            .parse()
            .with_context(|| format!("Invalid gRPC bind address {}", self.bind_address))
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
