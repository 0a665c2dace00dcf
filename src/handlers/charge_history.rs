use super::{EmailQuery, normalize_email, validate_non_negative};
use crate::db::Lookup;
use crate::db::models::ChargeStatus;
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct StartChargeRequest {
    pub email: String,
    pub id_charger: i64,
    pub id_vehicle_info: i64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub email: String,
    pub status: Option<ChargeStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteChargeRequest {
    pub total_energy_drawn: f64,
    #[serde(default)]
    pub time_end: Option<DateTime<Utc>>,
}

pub fn routes() -> Router<HubState> {
    Router::new()
        .route("/charge_history", get(list_history).post(start_charge))
        .route("/charge_history/in_progress", get(in_progress))
        .route("/charge_history/{id}/complete", put(complete_charge))
}

/// POST /charge_history
pub async fn start_charge(
    State(state): State<HubState>,
    Json(body): Json<StartChargeRequest>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&body.email)?;
    let storage = &state.storage;
    let user_id = storage.user_id_by_email(&email).await?;
    storage.ensure_exists(Lookup::ChargerId(body.id_charger)).await?;
    storage
        .ensure_exists(Lookup::VehicleId(body.id_vehicle_info))
        .await?;

    let vehicle = storage.get_vehicle(body.id_vehicle_info).await?;
    if vehicle.id_user_info != user_id {
        return Err(HubError::bad_request(format!(
            "vehicle {} does not belong to '{email}'",
            vehicle.id
        )));
    }
    if storage.in_progress_for_user(user_id).await?.is_some() {
        return Err(HubError::conflict(format!(
            "'{email}' already has a charge in progress"
        )));
    }
    let charger = storage.get_charger(body.id_charger).await?;
    if charger.in_use {
        return Err(HubError::conflict(format!(
            "charger {} is already in use",
            charger.id
        )));
    }

    let history = storage
        .start_charge(user_id, body.id_charger, body.id_vehicle_info)
        .await?;
    info!(id = history.id, user_id, charger_id = body.id_charger, "charge started");
    Ok(types::created(history))
}

/// GET /charge_history?email=&status=
///
/// `status=in_progress` answers with the single open session (or `null`),
/// any other filter with a list.
pub async fn list_history(
    State(state): State<HubState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    if query.status == Some(ChargeStatus::InProgress) {
        let open = state.storage.in_progress_detail(user_id).await?;
        return Ok(types::success(open).into_response());
    }
    let rows = state
        .storage
        .list_charge_history(user_id, query.status)
        .await?;
    Ok(types::success(rows).into_response())
}

/// GET /charge_history/in_progress?email=
pub async fn in_progress(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    Ok(types::success(
        state.storage.in_progress_for_user(user_id).await?,
    ))
}

/// PUT /charge_history/{id}/complete
pub async fn complete_charge(
    State(state): State<HubState>,
    Path(id): Path<i64>,
    Json(body): Json<CompleteChargeRequest>,
) -> Result<impl IntoResponse, HubError> {
    validate_non_negative("total_energy_drawn", body.total_energy_drawn)?;
    state.storage.ensure_exists(Lookup::ChargeHistoryId(id)).await?;

    let time_end = body.time_end.unwrap_or_else(Utc::now);
    let history = state
        .storage
        .complete_charge(id, body.total_energy_drawn, time_end)
        .await?;
    info!(
        id,
        total_energy_drawn = history.total_energy_drawn,
        amount_payable = history.amount_payable,
        "charge completed"
    );
    Ok(types::success(history))
}
