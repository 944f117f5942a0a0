//! Greeting endpoint.
//!
//! Serves the configured template with the caller's name substituted.
//! Refuses when offline (400) and when no configuration is published (500).

use axum::{
    extract::{OriginalUri, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{ApiError, ErrorResponse};
use crate::http::server::AppState;
use crate::reload::render_greeting;

const DEFAULT_NAME: &str = "World";

#[derive(Debug, Deserialize)]
pub struct GreetingParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub content: String,
}

pub async fn greeting(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<GreetingParams>,
) -> Result<Json<Greeting>, ErrorResponse> {
    if !state.health.is_online() {
        return Err(ApiError::NotOnline.at(uri.path()));
    }

    let snapshot = state
        .config
        .read()
        .ok_or_else(|| ApiError::MissingConfiguration.at(uri.path()))?;
    let template = snapshot
        .message()
        .ok_or_else(|| ApiError::MissingConfiguration.at(uri.path()))?;

    let name = params.name.as_deref().unwrap_or(DEFAULT_NAME);
    tracing::debug!(name = %name, "Replying to greeting request");

    Ok(Json(Greeting {
        content: render_greeting(template, name),
    }))
}
