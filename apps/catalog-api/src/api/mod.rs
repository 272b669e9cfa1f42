//! API route composition

use axum::Router;
use domain_catalog::handlers;

use crate::state::AppState;

/// Compose the domain routers.
///
/// The resulting router is nested under `/api` by the server bootstrap,
/// giving `/api/items` and `/api/stats`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", handlers::router(state.service.clone()))
        .nest("/stats", handlers::stats_router(state.service.clone()))
}
