//! Webhook HTTP receiver
//!
//! Accepts the gateway's webhook POSTs and feeds them to a [`WebhookHandler`].

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::webhook::WebhookHandler;

/// Router with `POST /webhook` and `GET /health`
pub fn router(handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(log_request))
        .with_state(handler)
}

/// Run the webhook HTTP server until the listener fails
pub async fn run_server(addr: SocketAddr, handler: Arc<WebhookHandler>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Webhook server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(handler)).await?;
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Middleware to log all incoming HTTP requests
async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("HTTP {} {}", method, path);

    let response = next.run(req).await;

    debug!("Response status: {}", response.status());

    response
}

async fn receive_webhook(State(handler): State<Arc<WebhookHandler>>, body: String) -> Response {
    debug!("Webhook body length: {} bytes", body.len());

    match handler.process_json(&body) {
        Ok(handled) => {
            if !handled {
                debug!("Webhook accepted without a matching callback");
            }
            Json(json!({ "status": "success" })).into_response()
        }
        Err(e) => {
            warn!("Rejecting webhook body: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use parking_lot::Mutex;
    use serde_json::Value;
    use tower::ServiceExt;

    fn post_webhook(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(Arc::new(WebhookHandler::new()))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_webhook_routes_to_callback() {
        let handler = Arc::new(WebhookHandler::new());
        let texts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&texts);
        handler.on_incoming_message_text(move |n| {
            let text = n.raw["messageData"]["textMessageData"]["textMessage"].clone();
            sink.lock().push(text);
        });

        let body = r#"{
            "typeWebhook": "incomingMessageReceived",
            "idMessage": "BAE5F4886F6F2D05",
            "messageData": {
                "typeMessage": "textMessage",
                "textMessageData": {"textMessage": "hello"}
            }
        }"#;
        let response = router(Arc::clone(&handler))
            .oneshot(post_webhook(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "success"}));
        assert_eq!(*texts.lock(), vec![json!("hello")]);
    }

    #[tokio::test]
    async fn test_unrouted_webhook_is_still_accepted() {
        let response = router(Arc::new(WebhookHandler::new()))
            .oneshot(post_webhook(r#"{"typeWebhook": "somethingNew"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = router(Arc::new(WebhookHandler::new()))
            .oneshot(post_webhook("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }
}
