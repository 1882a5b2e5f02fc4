use axum::response::{IntoResponse, Response};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::errors::StructuredError;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Converts a panic anywhere below it, including a failed error-body
/// encode, into a generic 500 instead of dropping the connection.
pub fn recovery_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(render_panic as PanicHandler)
}

fn render_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    error!(panic = %detail, "Request handler panicked");

    // the panic text stays in the logs, never in the body
    StructuredError::internal_server_error("internal server error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("secret internals")
    }

    #[tokio::test]
    async fn test_panic_becomes_structured_500() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(recovery_layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "status": 500,
                "code": "ServerInternalError",
                "message": "internal server error"
            })
        );
    }
}
