use super::validate_non_negative;
use crate::db::Lookup;
use crate::db::models::NewConnectorType;
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use tracing::info;

pub fn routes() -> Router<HubState> {
    Router::new()
        .route(
            "/connector_type",
            get(list_connector_types).post(create_connector_type),
        )
        .route(
            "/connector_type/{id}",
            get(get_connector_type).delete(delete_connector_type),
        )
}

/// POST /connector_type
pub async fn create_connector_type(
    State(state): State<HubState>,
    Json(mut body): Json<NewConnectorType>,
) -> Result<impl IntoResponse, HubError> {
    body.name_connector = body.name_connector.trim().to_string();
    if body.name_connector.is_empty() {
        return Err(HubError::bad_request("name_connector must not be empty"));
    }
    validate_non_negative("max_power_kw", body.max_power_kw)?;
    state
        .storage
        .ensure_absent(Lookup::ConnectorTypeName(&body.name_connector))
        .await?;

    let connector = state.storage.insert_connector_type(&body).await?;
    info!(id = connector.id, name = %connector.name_connector, "connector type created");
    Ok(types::created(connector))
}

/// GET /connector_type
pub async fn list_connector_types(
    State(state): State<HubState>,
) -> Result<impl IntoResponse, HubError> {
    Ok(types::success(state.storage.list_connector_types().await?))
}

/// GET /connector_type/{id}
pub async fn get_connector_type(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::ConnectorTypeId(id)).await?;
    Ok(types::success(state.storage.get_connector_type(id).await?))
}

/// DELETE /connector_type/{id}
pub async fn delete_connector_type(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::ConnectorTypeId(id)).await?;
    state.storage.delete_connector_type(id).await?;
    info!(id, "connector type deleted");
    Ok(types::success(id))
}
