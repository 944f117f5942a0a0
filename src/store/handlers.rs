//! CRUD endpoints for products.
//!
//! Body handling follows one rule set for create and update:
//! unreadable body → 415, readable but invalid → 422, unknown id → 404.

use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::error::{ApiError, ErrorResponse};
use crate::http::server::AppState;
use crate::store::products::{Product, ProductPayload, StoreError};

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Product {} not found", raw)))
}

fn parse_payload(body: &Bytes) -> Result<ProductPayload, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::UnsupportedPayload(format!("Invalid JSON payload: {}", e)))?;
    serde_json::from_value(value)
        .map_err(|e| ApiError::Unprocessable(format!("Invalid product: {}", e)))
}

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.list())
}

pub async fn get_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ErrorResponse> {
    let id = parse_id(&raw_id).map_err(|e| e.at(uri.path()))?;
    state
        .products
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::from(StoreError::NotFound(id)).at(uri.path()))
}

pub async fn create_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Response, ErrorResponse> {
    let fields = parse_payload(&body)
        .and_then(|payload| payload.into_new().map_err(ApiError::Unprocessable))
        .map_err(|e| e.at(uri.path()))?;

    let product = state.products.create(fields);
    tracing::debug!(id = product.id, name = %product.name, "Product created");

    let location = format!("/api/products/{}", product.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(product)).into_response())
}

pub async fn update_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ErrorResponse> {
    let id = parse_id(&raw_id).map_err(|e| e.at(uri.path()))?;
    let fields = parse_payload(&body)
        .and_then(|payload| payload.into_update(id).map_err(ApiError::Unprocessable))
        .map_err(|e| e.at(uri.path()))?;

    state
        .products
        .update(id, fields)
        .map(Json)
        .map_err(|e| ApiError::from(e).at(uri.path()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    let id = parse_id(&raw_id).map_err(|e| e.at(uri.path()))?;
    state
        .products
        .delete(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| ApiError::from(e).at(uri.path()))
}
