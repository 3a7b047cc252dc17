use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything that can go wrong while relaying a contact message.
#[derive(Error, Debug)]
pub enum ContactError {
    /// A field was absent, empty, or the body was not valid JSON
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The submitter's address does not look like an email
    #[error("invalid email address")]
    InvalidEmail,

    /// The mail transport rejected or failed to send the message
    #[error("mail delivery failed: {0}")]
    Mail(String),

    /// Relay configuration is incomplete or malformed
    #[error("configuration error: {0}")]
    Config(String),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MissingField(_) | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
            ContactError::Mail(_) | ContactError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the visitor. Transport details never leave the server.
    pub fn public_message(&self) -> &'static str {
        match self {
            ContactError::MissingField(_) => "All fields are required",
            ContactError::InvalidEmail => "Invalid email",
            ContactError::Mail(_) | ContactError::Config(_) => {
                "Failed to send email. Please try again."
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("contact relay: {}", self);
        } else {
            log::debug!("contact relay rejected request: {}", self);
        }
        let body = json!({ "success": false, "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_400() {
        assert_eq!(ContactError::MissingField("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ContactError::InvalidEmail.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn mail_errors_hide_details() {
        let err = ContactError::Mail("535 auth rejected".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("535"));
    }
}
