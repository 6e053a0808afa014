// Error type for the vault client. The walkthrough needs to tell apart
// connection failures (print an "is the Vault up?" hint) and 404s (the
// expected outcome of the post-deletion lookup), so the client returns a
// typed error instead of an opaque one.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Structured error body returned by the vault on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout)
    /// or the response body could not be decoded.
    #[error("request to the vault failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The vault answered with a non-success status.
    #[error("vault returned {status}: {message}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
}

impl ApiError {
    /// Map a failed response's status and raw body into an `Api` error,
    /// pulling `error_code`/`message` out of the JSON body when present.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApiError::Api {
                status,
                message: parsed
                    .message
                    .unwrap_or_else(|| status.to_string()),
                code: parsed.error_code,
            },
            Err(_) => ApiError::Api {
                status,
                code: None,
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body.to_string()
                },
            },
        }
    }

    /// True when the vault answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// True when the request never reached the vault.
    pub fn is_connect(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_connect() || e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_parsed() {
        let body = r#"{"error_code":"PV1234","message":"collection not found","context":{}}"#;
        let err = ApiError::from_status(StatusCode::NOT_FOUND, body);
        match &err {
            ApiError::Api { status, code, message } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(code.as_deref(), Some("PV1234"));
                assert_eq!(message, "collection not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_not_found());
        assert!(!err.is_connect());
    }

    #[test]
    fn plain_text_body_falls_through() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(
            err.to_string(),
            "vault returned 502 Bad Gateway: upstream exploded"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn empty_body_uses_the_status_line() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.to_string().contains("401 Unauthorized"));
    }
}
