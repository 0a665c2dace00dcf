use super::{EmailQuery, normalize_email, validate_percentage};
use crate::db::Lookup;
use crate::db::models::ChargeStatus;
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct NewChargeCurrentRequest {
    pub id_charge_history: i64,
    pub percentage_start: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChargeProgressRequest {
    pub percentage_current: f64,
}

pub fn routes() -> Router<HubState> {
    Router::new()
        .route("/charge_current", get(get_charge_current).post(create_charge_current))
        .route("/charge_current/{id}", put(update_charge_current))
}

/// POST /charge_current
pub async fn create_charge_current(
    State(state): State<HubState>,
    Json(body): Json<NewChargeCurrentRequest>,
) -> Result<impl IntoResponse, HubError> {
    validate_percentage("percentage_start", body.percentage_start)?;
    let storage = &state.storage;
    storage
        .ensure_exists(Lookup::ChargeHistoryId(body.id_charge_history))
        .await?;
    storage
        .ensure_absent(Lookup::ChargeCurrentForHistory(body.id_charge_history))
        .await?;

    let history = storage.get_charge_history(body.id_charge_history).await?;
    if history.status == ChargeStatus::Complete {
        return Err(HubError::conflict(format!(
            "charge_history with id {} is already complete",
            history.id
        )));
    }

    let current = storage
        .insert_charge_current(body.id_charge_history, body.percentage_start)
        .await?;
    debug!(id = current.id, history_id = history.id, "charge progress tracking started");
    Ok(types::created(current))
}

/// GET /charge_current?email=
pub async fn get_charge_current(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    Ok(types::success(
        state.storage.charge_current_for_user(user_id).await?,
    ))
}

/// PUT /charge_current/{id}
pub async fn update_charge_current(
    State(state): State<HubState>,
    Path(id): Path<i64>,
    Json(body): Json<ChargeProgressRequest>,
) -> Result<impl IntoResponse, HubError> {
    validate_percentage("percentage_current", body.percentage_current)?;
    let current = state
        .storage
        .update_charge_current(id, body.percentage_current)
        .await?
        .ok_or_else(|| HubError::not_found(format!("charge_current with id {id} not found")))?;
    Ok(types::success(current))
}
