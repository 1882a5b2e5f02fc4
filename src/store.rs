//! In-memory item registry backing the reference routes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;
use utoipa::ToSchema;

use crate::errors::StructuredError;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_VALUE_LEN: usize = 4096;

/// A stored named value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique item name
    pub name: String,
    /// Stored value
    pub value: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item '{0}' already exists")]
    AlreadyExists(String),

    #[error("item '{0}' not found")]
    NotFound(String),

    #[error("store is full ({0} items)")]
    CapacityExceeded(usize),
}

impl From<StoreError> for StructuredError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => StructuredError::already_exists(err.to_string()),
            StoreError::NotFound(_) => StructuredError::not_found(err.to_string()),
            StoreError::CapacityExceeded(_) => {
                StructuredError::bad_request("CapacityExceeded", err.to_string())
            }
        }
    }
}

/// Check an item name against the allowed charset and length
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("must be at most {} characters", MAX_NAME_LEN));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err("may only contain a-z, 0-9, '-' and '_'".to_string());
    }
    Ok(())
}

pub fn validate_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > MAX_VALUE_LEN {
        return Err(format!("must be at most {} bytes", MAX_VALUE_LEN));
    }
    Ok(())
}

pub struct ItemStore {
    items: RwLock<BTreeMap<String, Item>>,
    max_items: usize,
}

impl ItemStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            max_items,
        }
    }

    pub async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.name) {
            return Err(StoreError::AlreadyExists(item.name));
        }
        if items.len() >= self.max_items {
            return Err(StoreError::CapacityExceeded(self.max_items));
        }
        debug!(name = %item.name, "Inserted item");
        items.insert(item.name.clone(), item.clone());
        Ok(item)
    }

    pub async fn get(&self, name: &str) -> Result<Item, StoreError> {
        self.items
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub async fn remove(&self, name: &str) -> Result<Item, StoreError> {
        let removed = self.items.write().await.remove(name);
        match removed {
            Some(item) => {
                debug!(name = %name, "Removed item");
                Ok(item)
            }
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    /// All items ordered by name
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}
