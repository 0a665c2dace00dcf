use super::{EmailQuery, normalize_email};
use crate::db::Lookup;
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct FavouriteRequest {
    pub email: String,
    pub id_charger: i64,
}

pub fn routes() -> Router<HubState> {
    Router::new().route(
        "/favourite_charger",
        get(list_favourites)
            .post(add_favourite)
            .delete(remove_favourite),
    )
}

/// POST /favourite_charger
pub async fn add_favourite(
    State(state): State<HubState>,
    Json(body): Json<FavouriteRequest>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&body.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    state
        .storage
        .ensure_exists(Lookup::ChargerId(body.id_charger))
        .await?;
    if state.storage.favourite_exists(user_id, body.id_charger).await? {
        return Err(HubError::conflict(format!(
            "charger {} is already a favourite of '{email}'",
            body.id_charger
        )));
    }

    let favourite = state.storage.insert_favourite(user_id, body.id_charger).await?;
    info!(user_id, charger_id = body.id_charger, "favourite added");
    Ok(types::created(favourite))
}

/// GET /favourite_charger?email=
pub async fn list_favourites(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    Ok(types::success(
        state.storage.list_favourite_chargers(user_id).await?,
    ))
}

/// DELETE /favourite_charger?email=&id_charger=
pub async fn remove_favourite(
    State(state): State<HubState>,
    Query(query): Query<FavouriteRequest>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user_id = state.storage.user_id_by_email(&email).await?;
    if !state.storage.delete_favourite(user_id, query.id_charger).await? {
        return Err(HubError::not_found(format!(
            "charger {} is not a favourite of '{email}'",
            query.id_charger
        )));
    }
    info!(user_id, charger_id = query.id_charger, "favourite removed");
    Ok(types::success(query.id_charger))
}
