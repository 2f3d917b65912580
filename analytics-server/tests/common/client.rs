//! Clients for end-to-end tests
//!
//! `TestClient` wraps reqwest and provides methods for all analytics HTTP
//! endpoints. `TestClient::grpc` connects the generated gRPC client.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use jukebox_analytics_server::rpc::AnalyticsClient;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;
use tonic::transport::Channel;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Connects a gRPC client to the given endpoint
    ///
    /// # Panics
    ///
    /// Panics if the connection cannot be established.
    pub async fn grpc(grpc_url: String) -> AnalyticsClient<Channel> {
        AnalyticsClient::connect(grpc_url)
            .await
            .expect("Failed to connect gRPC client")
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// GET /
    pub async fn get_status(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Status request failed")
    }

    // ========================================================================
    // Analytics Endpoints
    // ========================================================================

    /// POST /api/v1/logs
    pub async fn log_playback(&self, track_id: i64, amount_paid: f64) -> Response {
        self.post_log_raw(json!({ "track_id": track_id, "amount_paid": amount_paid }).to_string())
            .await
    }

    /// POST /api/v1/logs with an arbitrary JSON body
    pub async fn post_log_raw(&self, body: String) -> Response {
        self.client
            .post(format!("{}/api/v1/logs", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Log playback request failed")
    }

    /// PATCH /api/v1/tracks/{id}/price
    pub async fn update_price(&self, track_id: &str, new_price: f64) -> Response {
        self.client
            .patch(format!("{}/api/v1/tracks/{}/price", self.base_url, track_id))
            .json(&json!({ "new_price": new_price }))
            .send()
            .await
            .expect("Update price request failed")
    }

    /// GET /api/v1/stats/top
    pub async fn get_top_tracks(&self) -> Response {
        self.client
            .get(format!("{}/api/v1/stats/top", self.base_url))
            .send()
            .await
            .expect("Top tracks request failed")
    }
}
