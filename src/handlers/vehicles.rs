use super::{EmailQuery, normalize_email, validate_non_negative};
use crate::db::Lookup;
use crate::db::models::{NewVehicle, VehicleUpdate};
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
pub struct NewVehicleRequest {
    pub email: String,
    #[serde(flatten)]
    pub vehicle: NewVehicle,
}

pub fn routes() -> Router<HubState> {
    Router::new()
        .route("/vehicle_info", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicle_info/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

/// POST /vehicle_info
pub async fn create_vehicle(
    State(state): State<HubState>,
    Json(body): Json<NewVehicleRequest>,
) -> Result<impl IntoResponse, HubError> {
    let NewVehicleRequest { email, mut vehicle } = body;
    let email = normalize_email(&email)?;
    vehicle.vehicle_sn = vehicle.vehicle_sn.trim().to_string();
    if vehicle.vehicle_sn.is_empty() {
        return Err(HubError::bad_request("vehicle_sn must not be empty"));
    }
    validate_non_negative("battery_capacity_kwh", vehicle.battery_capacity_kwh)?;

    let user_id = state.storage.user_id_by_email(&email).await?;
    state
        .storage
        .ensure_exists(Lookup::ConnectorTypeId(vehicle.id_connector_type))
        .await?;
    state
        .storage
        .ensure_absent(Lookup::VehicleSn(&vehicle.vehicle_sn))
        .await?;

    let created = state.storage.insert_vehicle(user_id, &vehicle).await?;
    info!(id = created.id, user_id, vehicle_sn = %created.vehicle_sn, "vehicle created");
    Ok(types::created(created))
}

/// GET /vehicle_info?email=
pub async fn list_vehicles(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    Ok(types::success(state.storage.list_vehicles(user_id).await?))
}

/// GET /vehicle_info/{id}
pub async fn get_vehicle(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::VehicleId(id)).await?;
    Ok(types::success(state.storage.get_vehicle(id).await?))
}

/// PUT /vehicle_info/{id}
pub async fn update_vehicle(
    State(state): State<HubState>,
    Path(id): Path<i64>,
    Json(body): Json<VehicleUpdate>,
) -> Result<impl IntoResponse, HubError> {
    validate_non_negative("battery_capacity_kwh", body.battery_capacity_kwh)?;
    state.storage.ensure_exists(Lookup::VehicleId(id)).await?;
    state
        .storage
        .ensure_exists(Lookup::ConnectorTypeId(body.id_connector_type))
        .await?;

    let vehicle = state
        .storage
        .update_vehicle(id, &body)
        .await?
        .ok_or_else(|| HubError::not_found(format!("vehicle_info with id {id} not found")))?;
    Ok(types::success(vehicle))
}

/// DELETE /vehicle_info/{id}
pub async fn delete_vehicle(
    State(state): State<HubState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HubError> {
    state.storage.ensure_exists(Lookup::VehicleId(id)).await?;
    state.storage.delete_vehicle(id).await?;
    info!(id, "vehicle deleted");
    Ok(types::success(id))
}
