use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::{CreateItemRequest, API_KEY_HEADER};
use crate::errors::{ParamError, StructuredError};
use crate::store::Item;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Structured Errors Reference Service",
        version = "0.1.0",
        description = "Small item registry whose every failure is reported as a structured JSON error with a status, a machine-readable code, a message, and optional per-field errors.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::list_items,
        crate::api::handlers::get_item,
        crate::api::handlers::create_item,
        crate::api::handlers::delete_item,
    ),
    components(
        schemas(
            StructuredError,
            ParamError,
            Item,
            CreateItemRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Item registry endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_schemas_are_documented() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["StructuredError"]["properties"]["errors"].is_object());
        assert!(schemas["ParamError"]["properties"]["field"].is_object());
        assert!(doc["paths"]["/items/{name}"].is_object());
    }
}
