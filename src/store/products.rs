//! In-memory product store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub stock: u64,
}

/// Validated product fields, without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub stock: u64,
}

/// Raw request body for create and update.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub stock: Option<i64>,
}

impl ProductPayload {
    /// Validate a create request. Ids are assigned by the store.
    pub fn into_new(self) -> Result<ProductFields, String> {
        if self.id.is_some() {
            return Err("Id was invalidly set on request".to_string());
        }
        self.into_fields()
    }

    /// Validate an update of product `id`. A body id, if present, must match.
    pub fn into_update(self, id: u64) -> Result<ProductFields, String> {
        match self.id {
            Some(body_id) if u64::try_from(body_id).ok() != Some(id) => {
                Err(format!("Id in body ({}) does not match path id ({})", body_id, id))
            }
            _ => self.into_fields(),
        }
    }

    fn into_fields(self) -> Result<ProductFields, String> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err("The name must be set".to_string()),
        };
        let stock = match self.stock {
            None => 0,
            Some(stock) => u64::try_from(stock).map_err(|_| "The stock must not be negative".to_string())?,
        };
        Ok(ProductFields { name, stock })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Product {0} not found")]
    NotFound(u64),
}

/// Thread-safe product store. Clones share the same data.
#[derive(Debug, Clone)]
pub struct ProductStore {
    items: Arc<DashMap<u64, Product>>,
    next_id: Arc<AtomicU64>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// All products ordered by id.
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.items.iter().map(|e| e.value().clone()).collect();
        products.sort_by_key(|p| p.id);
        products
    }

    pub fn get(&self, id: u64) -> Option<Product> {
        self.items.get(&id).map(|p| p.clone())
    }

    pub fn create(&self, fields: ProductFields) -> Product {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = Product {
            id,
            name: fields.name,
            stock: fields.stock,
        };
        self.items.insert(id, product.clone());
        product
    }

    pub fn update(&self, id: u64, fields: ProductFields) -> Result<Product, StoreError> {
        let mut entry = self.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.name = fields.name;
        entry.stock = fields.stock;
        Ok(entry.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
