use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized - session may be expired")]
    Unauthorized,

    #[error("Permission denied: you do not have access to modify this data")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Postgres error code for insufficient privilege, which is what a
/// row-level-security rejection surfaces as through PostgREST.
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Error body shape shared by PostgREST and GoTrue responses. Every field
/// is optional because the two services disagree on naming.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Best human-readable message from a JSON error body, falling back to
    /// the raw (truncated) body text.
    pub fn extract_message(body: &str) -> String {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .unwrap_or_else(|| Self::truncate_body(body))
    }

    /// Whether the body describes a row-level-security rejection
    fn is_rls_violation(body: &str) -> bool {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        if parsed.code.as_deref() == Some(PG_INSUFFICIENT_PRIVILEGE) {
            return true;
        }
        body.to_lowercase().contains("row-level security")
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::extract_message(body);
        match status.as_u16() {
            400 if message.to_lowercase().contains("invalid login credentials") => {
                ApiError::InvalidCredentials
            }
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::ServerError(message),
            _ if Self::is_rls_violation(body) => ApiError::AccessDenied(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_invalid_credentials_from_gotrue_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[test]
    fn test_rls_violation_maps_to_access_denied() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy for table \"asistencias\""}"#;
        let err = ApiError::from_status(StatusCode::CONFLICT, body);
        assert!(matches!(err, ApiError::AccessDenied(_)));
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_extract_message_prefers_json_fields() {
        assert_eq!(
            ApiError::extract_message(r#"{"message":"boom"}"#),
            "boom"
        );
        assert_eq!(ApiError::extract_message(r#"{"msg":"nope"}"#), "nope");
        assert_eq!(ApiError::extract_message("plain text"), "plain text");
    }

    #[test]
    fn test_server_error_truncation_not_needed_for_short_bodies() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert_eq!(err.to_string(), "Server error: oops");
    }
}
