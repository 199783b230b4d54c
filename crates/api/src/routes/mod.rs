//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::optional_auth_middleware};

pub mod health;
pub mod resources;

/// Creates the API router with routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // The resource routes resolve an actor when a token is presented;
    // per-route authentication requirements live in the extractors.
    let resource_routes = resources::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        optional_auth_middleware,
    ));

    Router::new().merge(health::routes()).merge(resource_routes)
}
