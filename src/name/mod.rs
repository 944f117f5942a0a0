//! Name service with a switchable failure mode.
//!
//! `GET /api/name` answers while the state is `ok` and fails with 500
//! while it is `fail`; `PUT /api/state` flips it at runtime.

pub mod handlers;
pub mod state;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub use state::{NameState, NameToggle};

pub fn setup_name_router() -> Router<AppState> {
    Router::new()
        .route("/api/name", get(get_name))
        .route("/api/state", get(get_state).put(put_state))
}
