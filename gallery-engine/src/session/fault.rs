use serde::{Deserialize, Serialize};
use thiserror::Error;

use constants::session::UNKNOWN_SESSION_ERROR;

/// Fault as reported by the platform's session API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PlatformError {
    /// DOMException name, e.g. `NotAllowedError`.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Epoch of the session the fault belongs to, when the host tracks it.
    #[serde(default)]
    pub epoch: Option<u64>,
}

impl PlatformError {
    pub fn with_code(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFaultKind {
    PermissionDenied,
    NotSupported,
    InsecureContext,
    SessionConflict,
    Aborted,
    Unknown,
}

/// A dismissible, retryable session failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct SessionFault {
    pub kind: SessionFaultKind,
    pub message: String,
    pub code: Option<String>,
}

impl SessionFault {
    /// Classify by platform error code; unknown or missing codes fall back to
    /// the generic message.
    pub fn classify(error: &PlatformError) -> Self {
        let (kind, message) = match error.code.as_deref() {
            Some("NotAllowedError") => (
                SessionFaultKind::PermissionDenied,
                "Permission to start the AR session was denied",
            ),
            Some("NotSupportedError") => (
                SessionFaultKind::NotSupported,
                "This device cannot start an immersive AR session",
            ),
            Some("SecurityError") => (
                SessionFaultKind::InsecureContext,
                "AR sessions require a secure (HTTPS) connection",
            ),
            Some("InvalidStateError") => (
                SessionFaultKind::SessionConflict,
                "Another immersive session is already running",
            ),
            Some("AbortError") => (SessionFaultKind::Aborted, "The AR session was interrupted"),
            _ => (SessionFaultKind::Unknown, UNKNOWN_SESSION_ERROR),
        };
        Self {
            kind,
            message: message.to_string(),
            code: error.code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_classified() {
        let fault = SessionFault::classify(&PlatformError::with_code("NotAllowedError"));
        assert_eq!(fault.kind, SessionFaultKind::PermissionDenied);
        assert_eq!(fault.code.as_deref(), Some("NotAllowedError"));
    }

    #[test]
    fn missing_code_defaults_to_unknown() {
        let fault = SessionFault::classify(&PlatformError::default());
        assert_eq!(fault.kind, SessionFaultKind::Unknown);
        assert_eq!(fault.message, "unknown session error");

        let odd = SessionFault::classify(&PlatformError::with_code("WeirdError"));
        assert_eq!(odd.kind, SessionFaultKind::Unknown);
    }
}
