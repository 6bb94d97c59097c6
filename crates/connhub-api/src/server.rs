use crate::handlers::{connectors, health_check, AppState};
use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Routes over the connector registry
pub fn build_router(state: AppState, cors_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/api/connectors", get(connectors::list_connectors))
        .route(
            "/api/connectors/{id}",
            get(connectors::get_connector).patch(connectors::update_connector),
        )
        .route(
            "/api/connectors/{id}/enabled",
            patch(connectors::set_connector_enabled),
        )
        .route(
            "/api/social-connectors",
            get(connectors::list_enabled_social_connectors),
        )
        .route(
            "/api/social-connectors/{id}",
            get(connectors::get_social_connector),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app = app.layer(cors);
    }

    app
}

pub struct ApiServer {
    host: String,
    port: u16,
    cors_enabled: bool,
    state: AppState,
}

impl ApiServer {
    pub fn new(host: String, port: u16, cors_enabled: bool, state: AppState) -> Self {
        Self {
            host,
            port,
            cors_enabled,
            state,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = build_router(self.state, self.cors_enabled);

        let addr = format!("{}:{}", self.host, self.port);
        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
