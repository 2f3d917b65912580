//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test servers.
//! Each test gets an isolated server with its own store, reachable over
//! both HTTP and gRPC.

use super::constants::*;
use jukebox_analytics_server::analytics::AnalyticsService;
use jukebox_analytics_server::analytics_store::{
    AnalyticsStore, InMemoryAnalyticsStore, SqliteAnalyticsStore,
};
use jukebox_analytics_server::rpc::grpc_server;
use jukebox_analytics_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

/// Test server instance with an isolated store
///
/// When dropped, both transports shut down gracefully and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for HTTP requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Endpoint for the gRPC client (e.g., "http://127.0.0.1:12346")
    pub grpc_url: String,

    /// Store behind the service, for direct inspection in tests
    pub store: Arc<dyn AnalyticsStore>,

    // Private fields - keep resources alive until drop
    _temp_db_dir: Option<TempDir>,
    _http_shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    _grpc_shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server backed by the in-memory store
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryAnalyticsStore::new()), None).await
    }

    /// Spawns a new test server backed by a fresh SQLite database in a temp dir
    pub async fn spawn_sqlite() -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Self::open_sqlite(&temp_db_dir.path().join("analytics.db"));
        Self::spawn_with_store(store, Some(temp_db_dir)).await
    }

    /// Spawns a new test server on an existing SQLite database file
    pub async fn spawn_sqlite_at(db_path: &Path) -> Self {
        Self::spawn_with_store(Self::open_sqlite(db_path), None).await
    }

    fn open_sqlite(db_path: &Path) -> Arc<dyn AnalyticsStore> {
        Arc::new(SqliteAnalyticsStore::new(db_path).expect("Failed to open analytics database"))
    }

    /// This function:
    /// 1. Binds HTTP and gRPC listeners to random ports (127.0.0.1:0)
    /// 2. Spawns both transports in background tasks over one shared service
    /// 3. Waits for the HTTP server to be ready
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready within timeout.
    async fn spawn_with_store(
        store: Arc<dyn AnalyticsStore>,
        temp_db_dir: Option<TempDir>,
    ) -> Self {
        let service = Arc::new(AnalyticsService::new(store.clone()));

        let http_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let http_port = http_listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let grpc_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let grpc_port = grpc_listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (http_shutdown_tx, http_shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let (grpc_shutdown_tx, grpc_shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: http_port,
            ..ServerConfig::default()
        };
        let app = make_app(config, service.clone()).expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(http_listener, app)
                .with_graceful_shutdown(async {
                    http_shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(grpc_server(service))
                .serve_with_incoming_shutdown(TcpListenerStream::new(grpc_listener), async {
                    grpc_shutdown_rx.await.ok();
                })
                .await
                .expect("gRPC server failed");
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", http_port),
            grpc_url: format!("http://127.0.0.1:{}", grpc_port),
            store,
            _temp_db_dir: temp_db_dir,
            _http_shutdown_tx: Some(http_shutdown_tx),
            _grpc_shutdown_tx: Some(grpc_shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the / endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._http_shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(tx) = self._grpc_shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
