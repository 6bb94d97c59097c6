use axum::{extract::State, response::IntoResponse};
use connhub_core::ConnectorRegistry;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::ApiResponse;

pub mod connectors;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectorRegistry>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(registry: Arc<ConnectorRegistry>) -> Self {
        Self {
            registry,
            started_at: Instant::now(),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub catalog_size: usize,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        catalog_size: state.registry.catalog().len(),
    };

    ApiResponse::success(response, "System is healthy")
}
