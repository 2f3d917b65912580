use axum::extract::FromRef;

use crate::analytics::AnalyticsService;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedAnalyticsService = Arc<AnalyticsService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub analytics: GuardedAnalyticsService,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, analytics: GuardedAnalyticsService) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            analytics,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedAnalyticsService {
    fn from_ref(input: &ServerState) -> Self {
        input.analytics.clone()
    }
}
