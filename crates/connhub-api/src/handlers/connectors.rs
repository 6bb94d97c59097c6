use axum::{
    extract::{Path, State},
    Json,
};
use connhub_core::{ConnectorInstance, ConnectorPatch};
use serde::Deserialize;

use crate::{handlers::AppState, ApiError, ApiResponse};

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct EnabledBody {
    pub enabled: bool,
}

pub async fn list_connectors(State(state): State<AppState>) -> ApiResult<Vec<ConnectorInstance>> {
    let instances = state.registry.get_connector_instances().await?;
    Ok(ApiResponse::success(instances, "Connectors retrieved successfully"))
}

pub async fn get_connector(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ConnectorInstance> {
    let instance = state.registry.get_connector_instance_by_id(&id).await?;
    Ok(ApiResponse::success(instance, "Connector retrieved successfully"))
}

pub async fn update_connector(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ConnectorPatch>,
) -> ApiResult<ConnectorInstance> {
    if patch.is_empty() {
        return Ok(ApiResponse::bad_request("Nothing to update"));
    }

    let instance = state.registry.update_connector(&id, &patch).await?;
    Ok(ApiResponse::success(instance, "Connector updated successfully"))
}

pub async fn set_connector_enabled(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EnabledBody>,
) -> ApiResult<ConnectorInstance> {
    let patch = ConnectorPatch::enabled(body.enabled);
    let instance = state.registry.update_connector(&id, &patch).await?;

    let message = if body.enabled {
        "Connector enabled"
    } else {
        "Connector disabled"
    };
    Ok(ApiResponse::success(instance, message))
}

pub async fn list_enabled_social_connectors(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let ids = state.registry.get_enabled_social_connector_ids().await?;
    Ok(ApiResponse::success(ids, "Enabled social connectors retrieved successfully"))
}

pub async fn get_social_connector(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ConnectorInstance> {
    let instance = state.registry.get_social_connector_instance_by_id(&id).await?;
    Ok(ApiResponse::success(instance, "Social connector retrieved successfully"))
}
