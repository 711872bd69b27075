pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Router};

use state::DashboardState;

/// Builds the dashboard API router over an already-loaded session state.
pub fn router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/subcategories", get(routes::subcategories))
        .route("/rankings", get(routes::rankings))
        .with_state(state)
}
