use crate::db::HubStorage;
use crate::handlers;
use axum::{Router, http::header::CONTENT_TYPE};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Clone)]
pub struct HubState {
    pub storage: HubStorage,
}

impl HubState {
    pub fn new(storage: HubStorage) -> Self {
        Self { storage }
    }
}

/// Every resource route group, in registration order.
pub fn route_groups() -> Vec<(&'static str, Router<HubState>)> {
    vec![
        ("user_info", handlers::users::routes()),
        ("charger", handlers::chargers::routes()),
        ("connector_type", handlers::connector_types::routes()),
        ("favourite_charger", handlers::favourites::routes()),
        ("vehicle_info", handlers::vehicles::routes()),
        ("charge_history", handlers::charge_history::routes()),
        ("charge_current", handlers::charge_current::routes()),
    ]
}

/// Open CORS policy: any origin and method, `Content-Type` allowed and exposed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE])
        .expose_headers([CONTENT_TYPE])
}

pub fn hub_router(state: HubState) -> Router {
    let mut router = Router::new();
    for (name, group) in route_groups() {
        debug!(group = name, "registering route group");
        router = router.merge(group);
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
