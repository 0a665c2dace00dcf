use super::{EmailQuery, normalize_email};
use crate::db::Lookup;
use crate::db::models::{NewUser, UserUpdate};
use crate::{HubError, router::HubState, types};
use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use tracing::info;

pub fn routes() -> Router<HubState> {
    Router::new().route(
        "/user_info",
        get(get_user)
            .post(create_user)
            .put(update_user)
            .delete(delete_user),
    )
}

/// POST /user_info
pub async fn create_user(
    State(state): State<HubState>,
    Json(mut body): Json<NewUser>,
) -> Result<impl IntoResponse, HubError> {
    body.email = normalize_email(&body.email)?;
    state
        .storage
        .ensure_absent(Lookup::UserEmail(&body.email))
        .await?;

    let user = state.storage.insert_user(&body).await?;
    info!(id = user.id, email = %user.email, "user created");
    Ok(types::created(user))
}

/// GET /user_info?email=
pub async fn get_user(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user = state
        .storage
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| HubError::not_found(format!("user '{email}' not found")))?;
    Ok(types::success(user))
}

/// PUT /user_info?email=
pub async fn update_user(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
    Json(body): Json<UserUpdate>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    let user = state
        .storage
        .update_user(&email, &body)
        .await?
        .ok_or_else(|| HubError::not_found(format!("user '{email}' not found")))?;
    Ok(types::success(user))
}

/// DELETE /user_info?email=
pub async fn delete_user(
    State(state): State<HubState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = normalize_email(&query.email)?;
    state.storage.ensure_exists(Lookup::UserEmail(&email)).await?;
    state.storage.delete_user(&email).await?;
    info!(email = %email, "user deleted");
    Ok(types::success(email))
}
