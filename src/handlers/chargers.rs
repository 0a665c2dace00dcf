use super::validate_non_negative;
use crate::db::Lookup;
use crate::db::models::ChargerInput;
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ChargerFilter {
    pub id_connector_type: Option<i64>,
}

pub fn routes() -> Router<HubState> {
    Router::new()
        .route("/charger", get(list_chargers).post(create_charger))
        .route(
            "/charger/{id}",
            get(get_charger).put(update_charger).delete(delete_charger),
        )
}

fn validate(body: &ChargerInput) -> Result<(), HubError> {
    if body.name.trim().is_empty() {
        return Err(HubError::bad_request("name must not be empty"));
    }
    if !(-90.0..=90.0).contains(&body.latitude) || !(-180.0..=180.0).contains(&body.longitude) {
        return Err(HubError::bad_request("latitude/longitude out of range"));
    }
    validate_non_negative("rate_current", body.rate_current)
}

/// POST /charger
pub async fn create_charger(
    State(state): State<HubState>,
    Json(body): Json<ChargerInput>,
) -> Result<impl IntoResponse, HubError> {
    validate(&body)?;
    state
        .storage
        .ensure_exists(Lookup::ConnectorTypeId(body.id_connector_type))
        .await?;

    let charger = state.storage.insert_charger(&body).await?;
    info!(id = charger.id, name = %charger.name, "charger created");
    Ok(types::created(charger))
}

/// GET /charger?id_connector_type=
pub async fn list_chargers(
    State(state): State<HubState>,
    Query(filter): Query<ChargerFilter>,
) -> Result<impl IntoResponse, HubError> {
    let chargers = state.storage.list_chargers(filter.id_connector_type).await?;
    Ok(types::success(chargers))
}

/// GET /charger/{id}
pub async fn get_charger(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::ChargerId(id)).await?;
    Ok(types::success(state.storage.get_charger(id).await?))
}

/// PUT /charger/{id}
pub async fn update_charger(
    State(state): State<HubState>,
    Path(id): Path<i64>,
    Json(body): Json<ChargerInput>,
) -> Result<impl IntoResponse, HubError> {
    validate(&body)?;
    state.storage.ensure_exists(Lookup::ChargerId(id)).await?;
    state
        .storage
        .ensure_exists(Lookup::ConnectorTypeId(body.id_connector_type))
        .await?;

    let charger = state
        .storage
        .update_charger(id, &body)
        .await?
        .ok_or_else(|| HubError::not_found(format!("charger with id {id} not found")))?;
    Ok(types::success(charger))
}

/// DELETE /charger/{id}
pub async fn delete_charger(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::ChargerId(id)).await?;
    state.storage.delete_charger(id).await?;
    info!(id, "charger deleted");
    Ok(types::success(id))
}
