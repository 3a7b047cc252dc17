use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;

use crate::error::ContactError;
use crate::mailer::Mailer;
use crate::request::ContactRequest;

/// Route the contact form posts to.
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Build the relay router around a mailer.
pub fn router<M: Mailer>(mailer: Arc<M>) -> Router {
    Router::new()
        .route(SEND_EMAIL_PATH, any(send_email::<M>))
        .with_state(mailer)
}

/// Every response is readable cross-origin, including errors.
fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn send_email<M: Mailer>(
    State(mailer): State<Arc<M>>,
    method: Method,
    body: Bytes,
) -> Response {
    let response = if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else if method != Method::POST {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "success": false, "error": "Method not allowed" })),
        )
            .into_response()
    } else {
        match relay(mailer, &body).await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({ "success": true, "message": "Email sent successfully!" })),
            )
                .into_response(),
            Err(e) => e.into_response(),
        }
    };
    with_cors(response)
}

async fn relay<M: Mailer>(mailer: Arc<M>, body: &[u8]) -> Result<(), ContactError> {
    // A body that is not a JSON object has no fields.
    let request: ContactRequest = serde_json::from_slice(body).unwrap_or_default();
    let message = request.validate()?;

    tokio::task::spawn_blocking(move || mailer.send(&message))
        .await
        .map_err(|e| ContactError::Mail(format!("send task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ContactMessage;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records what would have been sent; fails on demand.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ContactMessage>>,
        fail: bool,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
            if self.fail {
                return Err(ContactError::Mail("connection refused by smtp.internal:587".into()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    const VALID: &str =
        r#"{"name":"Ada","email":"ada@example.com","subject":"Hi","message":"Hello there"}"#;

    async fn call(mailer: Arc<RecordingMailer>, method: Method, body: &str) -> (StatusCode, Response) {
        let request = Request::builder()
            .method(method)
            .uri(SEND_EMAIL_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(mailer).oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn options_is_ok_and_empty() {
        let (status, response) = call(Arc::default(), Method::OPTIONS, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&response);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let (status, response) = call(Arc::default(), Method::GET, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_cors(&response);
        let body = json_body(response).await;
        assert_eq!(body, json!({ "success": false, "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, response) = call(
            mailer.clone(),
            Method::POST,
            r#"{"name":"Ada","email":"ada@example.com","subject":"Hi"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "All fields are required");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_counts_as_missing_fields() {
        let (status, response) = call(Arc::default(), Method::POST, "name=Ada").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "All fields are required");
    }

    #[tokio::test]
    async fn bad_email_is_rejected() {
        let (status, response) = call(
            Arc::default(),
            Method::POST,
            r#"{"name":"Ada","email":"ada.example.com","subject":"Hi","message":"x"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Invalid email");
    }

    #[tokio::test]
    async fn valid_post_sends_mail() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, response) = call(mailer.clone(), Method::POST, VALID).await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({ "success": true, "message": "Email sent successfully!" })
        );
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn send_failure_is_generic_500() {
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let (status, response) = call(mailer, Method::POST, VALID).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to send email. Please try again.");
        assert!(!body.to_string().contains("smtp.internal"));
    }
}
