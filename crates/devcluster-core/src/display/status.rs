//! Transient user-visible messages.

use std::fmt;

use crate::error::ErrorKind;

/// The message area of the dashboard: a short line reporting the outcome of
/// the last operation. Failures carry their [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: Option<ErrorKind>,
}

impl Notice {
    /// Create a new success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
        }
    }

    /// Create a new failure notice.
    pub fn failure(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind: Some(kind),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind.is_some()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.is_failure() { "Error:" } else { "Success:" },
            self.message
        )
    }
}
