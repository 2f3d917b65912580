//! gRPC transport, maps `jukebox.analytics.Analytics` calls onto `AnalyticsService`.
//!
//! ## RPCs
//!
//! - `LogPlayback` - record a play. `LogPlaybackRequest` -> `Empty`.
//! - `UpdatePrice` - change a track's price. `UpdatePriceRequest` -> `Empty`.
//! - `GetTopTracks` - the most played tracks. `Empty` -> `TopTracksResponse`.

mod messages;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use crate::analytics::{AnalyticsError, AnalyticsService};

pub use messages::{Empty, LogPlaybackRequest, TopTrack, TopTracksResponse, UpdatePriceRequest};

include!(concat!(env!("OUT_DIR"), "/jukebox.analytics.Analytics.rs"));

pub use analytics_client::AnalyticsClient;
pub use analytics_server::{Analytics, AnalyticsServer};

/// Implements the generated `Analytics` trait on top of a shared service.
pub struct AnalyticsGrpcHandler {
    service: Arc<AnalyticsService>,
}

impl AnalyticsGrpcHandler {
    pub fn new(service: Arc<AnalyticsService>) -> Self {
        Self { service }
    }
}

fn to_status(err: AnalyticsError) -> Status {
    match err {
        AnalyticsError::TrackNotFound => Status::not_found(err.to_string()),
        AnalyticsError::InvalidPrice => Status::invalid_argument(err.to_string()),
        AnalyticsError::LogPersistenceFailure | AnalyticsError::StatsQueryFailure => {
            Status::internal(err.to_string())
        }
    }
}

#[tonic::async_trait]
impl Analytics for AnalyticsGrpcHandler {
    async fn log_playback(
        &self,
        request: Request<LogPlaybackRequest>,
    ) -> Result<Response<Empty>, Status> {
        let req = request.into_inner();
        self.service
            .create_log(req.track_id, req.amount_paid)
            .map_err(|err| {
                warn!("LogPlayback for track {} failed: {}", req.track_id, err);
                to_status(err)
            })?;
        Ok(Response::new(Empty {}))
    }

    async fn update_price(
        &self,
        request: Request<UpdatePriceRequest>,
    ) -> Result<Response<Empty>, Status> {
        let req = request.into_inner();
        self.service
            .update_price(req.track_id, req.new_price)
            .map_err(|err| {
                warn!("UpdatePrice for track {} failed: {}", req.track_id, err);
                to_status(err)
            })?;
        Ok(Response::new(Empty {}))
    }

    async fn get_top_tracks(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<TopTracksResponse>, Status> {
        let stats = self.service.get_top_tracks().map_err(|err| {
            warn!("GetTopTracks failed: {}", err);
            to_status(err)
        })?;
        let tracks = stats
            .into_iter()
            .map(|stat| TopTrack {
                title: stat.title,
                count: stat.count,
            })
            .collect();
        Ok(Response::new(TopTracksResponse { tracks }))
    }
}

/// Create an `AnalyticsServer` to compose with other tonic routes.
pub fn grpc_server(service: Arc<AnalyticsService>) -> AnalyticsServer<AnalyticsGrpcHandler> {
    AnalyticsServer::new(AnalyticsGrpcHandler::new(service))
}

/// Bind and serve the gRPC transport until the process stops.
pub async fn serve_grpc(service: Arc<AnalyticsService>, addr: SocketAddr) -> Result<()> {
    info!("gRPC listening on {}", addr);
    tonic::transport::Server::builder()
        .add_service(grpc_server(service))
        .serve(addr)
        .await
        .with_context(|| format!("gRPC server on {} failed", addr))
}
