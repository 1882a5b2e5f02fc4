use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{create_item, delete_item, get_item, health, list_items, AppState};
use super::middleware::logging_middleware;
use super::openapi::ApiDoc;
use super::recovery::recovery_layer;

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        // Health check
        .route("/health", get(health))
        // Item registry
        .route("/items", get(list_items).post(create_item))
        .route("/items/:name", get(get_item).delete(delete_item))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    with_layers(routes).with_state(state)
}

/// Wrap routes in the shared middleware stack
pub fn with_layers<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        // Layer order (outermost last): recovery sits inside logging so a
        // recovered panic is still logged as a 500
        .layer(recovery_layer())
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
