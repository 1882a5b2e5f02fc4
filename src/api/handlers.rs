use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::errors::{ParamError, StructuredError};
use crate::store::{validate_name, validate_value, Item, ItemStore};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub const API_KEY_HEADER: &str = "x-api-key";

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: ItemStore,
    pub api_key: Option<String>,
    pub instance_id: String,
}

/// Body of `POST /items`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Unique name, 1-64 characters of a-z, 0-9, '-' and '_'
    #[serde(default)]
    pub name: String,
    /// Value to store, at most 4096 bytes
    #[serde(default)]
    pub value: String,
}

impl CreateItemRequest {
    /// Collect every field failure instead of stopping at the first
    fn validate(&self) -> Result<(), StructuredError> {
        let mut errors = Vec::new();
        if let Err(msg) = validate_name(&self.name) {
            errors.push(ParamError::invalid("name", msg));
        }
        if let Err(msg) = validate_value(&self.value) {
            errors.push(ParamError::invalid("value", msg));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StructuredError::invalid_params(errors))
        }
    }
}

fn check_name(name: &str) -> Result<(), StructuredError> {
    validate_name(name).map_err(|msg| StructuredError::invalid_param("name", msg))
}

fn authorize(state: &AppStateInner, headers: &HeaderMap) -> Result<(), StructuredError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(());
    };

    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        warn!("Rejected request with missing or invalid API key");
        Err(StructuredError::unauthorized("missing or invalid API key"))
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "items": state.store.len().await,
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All stored items", body = [Item])
    )
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.list().await)
}

/// Get a single item by name
#[utoipa::path(
    get,
    path = "/items/{name}",
    tag = "items",
    params(
        ("name" = String, Path, description = "Item name")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "Malformed name", body = StructuredError),
        (status = 404, description = "Item not found", body = StructuredError)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Item>, StructuredError> {
    check_name(&name)?;
    let item = state.store.get(&name).await?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid body, duplicate name, or store full", body = StructuredError)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), StructuredError> {
    let Json(req) = payload.map_err(|rejection| {
        StructuredError::invalid_param("body", rejection.body_text())
    })?;
    req.validate()?;

    let item = state
        .store
        .insert(Item {
            name: req.name,
            value: req.value,
        })
        .await?;

    info!(name = %item.name, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{name}",
    tag = "items",
    params(
        ("name" = String, Path, description = "Item name")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Missing or invalid API key", body = StructuredError),
        (status = 404, description = "Item not found", body = StructuredError)
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, StructuredError> {
    authorize(&state, &headers)?;
    check_name(&name)?;
    state.store.remove(&name).await?;

    info!(name = %name, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}
