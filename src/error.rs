//! Error types for the knowledge-base client.
//!
//! Failures fall into three transport-level classes: a before-request hook
//! rejecting the call (`PreSend`, nothing was sent), a network-level failure
//! with no status code (`Network`), and a non-2xx HTTP response (`Http`,
//! carrying the raw body text plus the parsed JSON body when available).
//! A 2xx response whose business envelope signals failure maps to `Api`.

use serde_json::Value;

/// Fallback shown to users when a failure carries no readable detail.
pub const GENERIC_ERROR_DETAIL: &str = "Request failed";

/// Error type for all client operations
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    /// Non-2xx HTTP response. `message` holds the raw body text; `body` the
    /// parsed JSON when the body was valid JSON.
    #[error("HTTP error {status}: {message}")]
    Http {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// Transport-level failure; no status code is available.
    #[error("Network error: {0}")]
    Network(String),

    /// A before-request hook rejected the call; no network call was made.
    #[error("Request aborted before send: {0}")]
    PreSend(String),

    /// 2xx response whose business envelope carried a non-success code.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Streaming response failed mid-flight.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl KbError {
    /// Build an `Http` error from a status code and raw body text, parsing
    /// the body as JSON on a best-effort basis.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let body = serde_json::from_str(&message).ok();
        Self::Http {
            status,
            message,
            body,
        }
    }

    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Human-readable detail from the error body (`{"detail": "..."}`).
    ///
    /// Missing, non-JSON, or unexpectedly shaped bodies yield `None` rather
    /// than a secondary error.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.as_ref()?.get("detail")?.as_str(),
            _ => None,
        }
    }

    /// Detail message for display, degrading to the generic fallback.
    pub fn display_detail(&self) -> &str {
        self.detail().unwrap_or(GENERIC_ERROR_DETAIL)
    }
}

impl From<reqwest::Error> for KbError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for KbError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_parses_json_body() {
        let err = KbError::http(403, r#"{"detail":"no permission"}"#);
        assert_eq!(err.status(), Some(403));
        assert!(err.is_forbidden());
        assert_eq!(err.detail(), Some("no permission"));
        assert_eq!(err.display_detail(), "no permission");
    }

    #[test]
    fn invalid_json_body_degrades_to_fallback() {
        let err = KbError::http(500, "<html>Internal Server Error</html>");
        assert_eq!(err.detail(), None);
        assert_eq!(err.display_detail(), GENERIC_ERROR_DETAIL);
    }

    #[test]
    fn empty_body_degrades_to_fallback() {
        let err = KbError::http(502, "");
        assert_eq!(err.detail(), None);
        assert_eq!(err.display_detail(), GENERIC_ERROR_DETAIL);
    }

    #[test]
    fn json_body_without_detail_degrades_to_fallback() {
        let err = KbError::http(401, r#"{"error":"expired"}"#);
        assert_eq!(err.detail(), None);
        assert!(err.is_unauthorized());
        assert_eq!(err.display_detail(), GENERIC_ERROR_DETAIL);
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(KbError::Network("timed out".into()).status(), None);
        assert_eq!(KbError::PreSend("bad header".into()).status(), None);
        assert_eq!(
            KbError::Network("timed out".into()).display_detail(),
            GENERIC_ERROR_DETAIL
        );
    }
}
