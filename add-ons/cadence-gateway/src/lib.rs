//! Cadence truncation gateway.
//!
//! One stateless route, `POST /validate-audio-length`, plus `GET /health`. Any failure
//! inside a request (unreadable body, wrong shape, a panic in the handler) becomes a bare
//! 400; the process keeps serving.

pub mod error;
pub mod handlers;

pub use error::GatewayError;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use cadence_core::VALIDATE_PATH;
use std::any::Any;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// The gateway's routes with panic recovery and request tracing applied.
pub fn router() -> Router {
    with_layers(
        Router::new()
            .route("/health", get(handlers::health))
            .route(VALIDATE_PATH, post(handlers::validate_audio_length)),
    )
}

fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_to_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_to_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    GatewayError::Internal(detail).into_response()
}

/// Serve [`router`] on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cadence_core::BUDGET_SECS;
    use tower::ServiceExt;

    async fn post_validate(app: Router, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("POST")
            .uri(VALIDATE_PATH)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn numbered(range: std::ops::Range<usize>) -> String {
        range.map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn short_text_is_returned_unchanged() {
        let (status, bytes) =
            post_validate(router(), r#"{"length": 45, "text": "hello world"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hello world" }));
    }

    #[tokio::test]
    async fn unchanged_text_keeps_original_whitespace() {
        let body = serde_json::json!({ "length": 12.5, "text": "  a\tb\n" });
        let (status, bytes) = post_validate(router(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], "  a\tb\n");
    }

    #[tokio::test]
    async fn long_text_keeps_centered_window() {
        let body = serde_json::json!({ "length": 75, "text": numbered(0..200) });
        let (status, bytes) = post_validate(router(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], numbered(70..130));
    }

    #[tokio::test]
    async fn exactly_sixty_seconds_is_not_truncated() {
        let text = numbered(0..180);
        let length = cadence_core::estimate_duration(&text);
        assert_eq!(length, BUDGET_SECS);
        let body = serde_json::json!({ "length": length, "text": text });
        let (status, bytes) = post_validate(router(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], numbered(0..180));
    }

    #[tokio::test]
    async fn length_decides_even_when_text_is_short() {
        // The caller's length is trusted for the threshold; the window clamps to the text.
        let body = serde_json::json!({ "length": 61, "text": "a  b   c" });
        let (_, bytes) = post_validate(router(), body.to_string()).await;
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], "a b c");
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let (status, bytes) = post_validate(router(), "{}").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], "");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request_with_empty_body() {
        for body in ["not json", "", "[1, 2]", "null", r#"{"length": "long"}"#, r#"{"text": 7}"#] {
            let (status, bytes) = post_validate(router(), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
            assert!(bytes.is_empty(), "body: {:?}", body);
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_still_parsed() {
        let req = Request::builder()
            .method("POST")
            .uri(VALIDATE_PATH)
            .body(Body::from(r#"{"length": 1, "text": "hi"}"#))
            .unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn service_keeps_serving_after_malformed_request() {
        let app = router();
        let (status, _) = post_validate(app.clone(), "{{{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, bytes) =
            post_validate(app, r#"{"length": 45, "text": "hello world"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], "hello world");
    }

    #[tokio::test]
    async fn handler_panic_becomes_bad_request() {
        async fn explode() -> &'static str {
            panic!("policy blew up")
        }
        let app = with_layers(Router::new().route(VALIDATE_PATH, post(explode)));
        let (status, bytes) = post_validate(app.clone(), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(bytes.is_empty());

        // Same router keeps answering.
        let (status, _) = post_validate(app, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn concurrent_requests_are_independent() {
        let app = router();
        let mut handles = Vec::new();
        for i in 0..32usize {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                let n = 100 + i * 10;
                let body = serde_json::json!({ "length": 90, "text": numbered(0..n) });
                let (status, bytes) = post_validate(app, body.to_string()).await;
                let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                let mid = n / 2;
                (status, json["text"].as_str().unwrap_or_default().to_string(), mid)
            }));
        }
        for handle in handles {
            let (status, text, mid) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(text, numbered(mid - 30..mid + 30));
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn serve_answers_over_tcp_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, async {
            let _ = stop_rx.await;
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
