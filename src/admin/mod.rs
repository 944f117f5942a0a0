pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/killme", get(kill_me))
        .route("/api/status", get(get_status))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
