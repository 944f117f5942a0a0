//! Product resource service.
//!
//! A plain CRUD list with unique integer ids, kept in memory.

pub mod handlers;
pub mod products;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub use products::{Product, ProductStore};

pub fn setup_store_router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
