use thiserror::Error;

use crate::types::ApiErrorBody;

pub type Result<T> = std::result::Result<T, YouTubeError>;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}, reason {reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl YouTubeError {
    /// Build an `Api` error from a non-success response body.
    ///
    /// The Data API wraps failures as `{"error": {"code", "message", "errors": [{"reason"}]}}`.
    /// Bodies that don't match keep the raw text as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => {
                let reason = parsed
                    .error
                    .errors
                    .first()
                    .and_then(|e| e.reason.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                YouTubeError::Api {
                    status,
                    reason,
                    message: parsed.error.message.unwrap_or_default(),
                }
            }
            Err(_) => YouTubeError::Api {
                status,
                reason: "unknown".to_string(),
                message: body.to_string(),
            },
        }
    }

    /// The API's machine-readable reason, if this is an API error.
    pub fn reason(&self) -> Option<&str> {
        match self {
            YouTubeError::Api { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        YouTubeError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for YouTubeError {
    fn from(err: serde_json::Error) -> Self {
        YouTubeError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_error_reason() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "The video identified by the videoId parameter has disabled comments.",
                "errors": [{"reason": "commentsDisabled", "domain": "youtube.commentThread"}]
            }
        }"#;

        let err = YouTubeError::from_response(403, body);
        assert_eq!(err.reason(), Some("commentsDisabled"));
        match err {
            YouTubeError::Api { status, message, .. } => {
                assert_eq!(status, 403);
                assert!(message.contains("disabled comments"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_keeps_raw_text() {
        let err = YouTubeError::from_response(502, "Bad Gateway");
        match err {
            YouTubeError::Api { status, reason, message } => {
                assert_eq!(status, 502);
                assert_eq!(reason, "unknown");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
