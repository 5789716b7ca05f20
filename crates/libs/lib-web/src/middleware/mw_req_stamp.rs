//! # Request Stamping Middleware
//!
//! Gives every request a unique ID, stored in the request extensions and
//! echoed back in the `X-Request-ID` response header. The logging middleware
//! and the trace span read the ID from the extensions.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Response header carrying the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
    /// When the request entered the service; request durations are measured from here
    pub received_at: Instant,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            received_at: Instant::now(),
        }
    }
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();

    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Extension, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_stamp_matches_response_header() {
        let app = Router::new()
            .route("/", get(|Extension(stamp): Extension<RequestStamp>| async move { stamp.id }))
            .layer(from_fn(stamp_req));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(header.as_bytes(), &body[..]);
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[tokio::test]
    async fn test_stamp_precedes_handler() {
        let app = Router::new()
            .route(
                "/",
                get(|Extension(stamp): Extension<RequestStamp>| async move {
                    (stamp.received_at <= Instant::now()).to_string()
                }),
            )
            .layer(from_fn(stamp_req));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(&body[..], b"true");
    }
}
