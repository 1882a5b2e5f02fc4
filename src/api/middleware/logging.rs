use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::ErrorCode;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const SENSITIVE_KEYS: [&str; 4] = ["api_key", "token", "password", "secret"];

/// Logs each request and its outcome, tagging failures with their error code
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = redact_query(request.uri().query().unwrap_or(""));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %query,
        "Incoming request"
    );

    let mut response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();
    let code = response
        .extensions()
        .get::<ErrorCode>()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default();

    if response.status().is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            code = %code,
            duration_ms = %duration_ms,
            "Request failed (server error)"
        );
    } else if response.status().is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            code = %code,
            duration_ms = %duration_ms,
            "Request failed (client error)"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Mask values of sensitive query parameters
fn redact_query(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_KEYS.contains(&key) => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_query() {
        assert_eq!(redact_query(""), "");
        assert_eq!(redact_query("q=sol+ring"), "q=sol+ring");
        assert_eq!(redact_query("api_key=secret123"), "api_key=***");
        assert_eq!(
            redact_query("q=test&token=abc&password=hunter2&limit=10"),
            "q=test&token=***&password=***&limit=10"
        );
    }
}
