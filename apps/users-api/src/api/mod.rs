//! API routes module
//!
//! Assembles the users API, health endpoints and browser client into one router.

pub mod client;
pub mod health;
pub mod users;

use axum::Router;
use axum_helpers::{CorsConfigError, create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api/v1 by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}

/// Full application router: API and docs from `create_router`, plus
/// `/health`, `/ready` and the client page at `/`.
pub fn app(state: &AppState) -> Result<Router, CorsConfigError> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
        .merge(client::router()))
}
