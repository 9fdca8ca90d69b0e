//! Error types for the dashboard client.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Message shown when the auth bootstrap cannot complete.
pub const AUTH_INIT_FAILED: &str = "Failed to initialize authorization";

/// Every failure a backend call or a local operation can produce.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The bearer token is missing or no longer valid (HTTP 401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
    /// Any other non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The request never produced a response
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// Auth widget bootstrap failed (config fetch or provider init)
    #[error("Failed to initialize authorization: {message}")]
    AuthInit { message: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// CSV export errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of a failure, used to pick the reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 401, forces the logged-out view
    SessionExpired,
    /// Other 4xx responses, shown verbatim
    Request,
    /// 5xx responses
    Server,
    /// No response at all
    Transport,
    /// Auth bootstrap failure, blocks further interaction
    AuthInit,
    /// Failures that never reached the backend
    Local,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::SessionExpired => "session expired",
            ErrorKind::Request => "request failed",
            ErrorKind::Server => "server error",
            ErrorKind::Transport => "transport failure",
            ErrorKind::AuthInit => "authorization failure",
            ErrorKind::Local => "local error",
        };
        f.write_str(name)
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DashboardError {
        DashboardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl DashboardError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a reqwest failure that produced no usable response.
    pub fn transport(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            message: message.into(),
            source,
        }
    }

    /// Maps a non-success status and its raw body to an error.
    ///
    /// A 401 body of the form `{"error": "..."}` contributes its message;
    /// anything else is kept verbatim.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
                .unwrap_or_else(|| "session expired".to_string());
            Self::Unauthorized { message }
        } else {
            Self::Http { status, body }
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Unauthorized { .. } => ErrorKind::SessionExpired,
            DashboardError::Http { status, .. } if *status >= 500 => ErrorKind::Server,
            DashboardError::Http { .. } => ErrorKind::Request,
            DashboardError::Transport { .. } => ErrorKind::Transport,
            DashboardError::AuthInit { .. } => ErrorKind::AuthInit,
            _ => ErrorKind::Local,
        }
    }

    /// True for the one distinguished error: an invalid bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::SessionExpired
    }

    /// Text suitable for the transient notice area.
    pub fn notice(&self) -> String {
        match self {
            DashboardError::Http { status, body } if body.trim().is_empty() => {
                format!("HTTP {status}")
            }
            DashboardError::Http { body, .. } => body.clone(),
            DashboardError::Unauthorized { message } => message.clone(),
            DashboardError::AuthInit { .. } => format!("{AUTH_INIT_FAILED}."),
            other => other.to_string(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_401_uses_error_field() {
        let err = DashboardError::from_status(401, r#"{"error":"token expired"}"#.to_string());
        assert!(err.is_unauthorized());
        assert_eq!(err.notice(), "token expired");
    }

    #[test]
    fn test_from_status_401_without_body() {
        let err = DashboardError::from_status(401, String::new());
        assert_eq!(err.kind(), ErrorKind::SessionExpired);
        assert_eq!(err.notice(), "session expired");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            DashboardError::from_status(400, "{}".into()).kind(),
            ErrorKind::Request
        );
        assert_eq!(
            DashboardError::from_status(503, "down".into()).kind(),
            ErrorKind::Server
        );
        assert_eq!(
            DashboardError::invalid_input("zone").with_reason("empty").kind(),
            ErrorKind::Local
        );
    }

    #[test]
    fn test_http_notice_is_raw_payload() {
        let err = DashboardError::from_status(422, r#"{"message":"bad zone"}"#.into());
        assert_eq!(err.notice(), r#"{"message":"bad zone"}"#);
        let empty = DashboardError::from_status(500, String::new());
        assert_eq!(empty.notice(), "HTTP 500");
    }

    #[test]
    fn test_auth_init_notice() {
        let err = DashboardError::AuthInit {
            message: "config fetch failed".into(),
        };
        assert_eq!(err.notice(), "Failed to initialize authorization.");
        assert_eq!(err.kind(), ErrorKind::AuthInit);
    }
}
