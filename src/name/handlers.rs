use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{ApiError, ErrorResponse};
use crate::http::server::AppState;
use crate::name::state::NameState;

/// Name handed out while the service is healthy.
pub const NAME: &str = "World";

#[derive(Debug, Serialize, Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StateBody {
    pub state: NameState,
}

pub async fn get_name(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<NameBody>, ErrorResponse> {
    match state.name.state() {
        NameState::Ok => Ok(Json(NameBody {
            name: NAME.to_string(),
        })),
        NameState::Fail => Err(ApiError::Failing.at(uri.path())),
    }
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateBody> {
    Json(StateBody {
        state: state.name.state(),
    })
}

/// Set the state from `{"state": "ok" | "fail"}` and echo it back.
pub async fn put_state(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Json<StateBody>, ErrorResponse> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::UnsupportedPayload(format!("Invalid JSON payload: {}", e)).at(uri.path())
    })?;
    let requested: StateBody = serde_json::from_value(value).map_err(|e| {
        ApiError::Unprocessable(format!("Invalid state: {}", e)).at(uri.path())
    })?;

    state.name.set(requested.state);
    Ok(Json(requested))
}
