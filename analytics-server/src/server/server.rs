use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{info, warn};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ServerConfig};
use crate::analytics::AnalyticsError;
use crate::analytics_store::TrackId;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct CreateLogBody {
    pub track_id: TrackId,
    pub amount_paid: f64,
}

#[derive(Deserialize, Debug)]
struct UpdatePriceBody {
    pub new_price: f64,
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AnalyticsError::TrackNotFound => (StatusCode::NOT_FOUND, "Track not found"),
            AnalyticsError::InvalidPrice => {
                (StatusCode::BAD_REQUEST, "Price must be greater than 0")
            }
            AnalyticsError::LogPersistenceFailure => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create log")
            }
            AnalyticsError::StatsQueryFailure => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get stats")
            }
        };
        (status, message).into_response()
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, "Invalid request body").into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn post_log(
    State(analytics): State<GuardedAnalyticsService>,
    body: Result<Json<CreateLogBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match analytics.create_log(body.track_id, body.amount_paid) {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => {
            warn!("POST /api/v1/logs track_id={} failed: {}", body.track_id, err);
            err.into_response()
        }
    }
}

async fn patch_track_price(
    State(analytics): State<GuardedAnalyticsService>,
    track_id: Result<Path<TrackId>, PathRejection>,
    body: Result<Json<UpdatePriceBody>, JsonRejection>,
) -> Response {
    let Path(track_id) = match track_id {
        Ok(id) => id,
        Err(rejection) => {
            warn!("Rejected track id: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, "Invalid track ID").into_response();
        }
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match analytics.update_price(track_id, body.new_price) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            warn!(
                "PATCH /api/v1/tracks/{}/price new_price={} failed: {}",
                track_id, body.new_price, err
            );
            err.into_response()
        }
    }
}

async fn get_top_tracks(State(analytics): State<GuardedAnalyticsService>) -> Response {
    match analytics.get_top_tracks() {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => {
            warn!("GET /api/v1/stats/top failed: {}", err);
            err.into_response()
        }
    }
}

pub fn make_app(config: ServerConfig, analytics: GuardedAnalyticsService) -> Result<Router> {
    let state = ServerState::new(config, analytics);

    let api_routes: Router = Router::new()
        .route("/logs", post(post_log))
        .route("/tracks/{id}/price", patch(patch_track_price))
        .route("/stats/top", get(get_top_tracks))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(config: ServerConfig, analytics: GuardedAnalyticsService) -> Result<()> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, analytics)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", addr))?;
    info!("HTTP listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")
}
