//! Route definitions for the library HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, login, token exchange, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/token", post(handlers::auth::token))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/whoami", get(handlers::auth::whoami))
}

/// User administration and memberships
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/create", post(handlers::users::create_user))
        .route("/users/me", get(handlers::users::me))
        .route(
            "/users/membership/activate",
            post(handlers::users::activate_membership),
        )
        .route(
            "/users/membership/block",
            post(handlers::users::block_membership),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(handlers::health::healthcheck))
}
