//! Gallery-wide error taxonomy.
//!
//! Module errors (`SessionError`, `CapabilityFailure`, `ConfigError`) convert
//! into `GalleryError`, which the RPC layer maps onto JSON-RPC error codes.

use thiserror::Error;

use crate::capability::CapabilityFailure;
use crate::config::ConfigError;
use crate::session::{SessionError, SessionFault};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// Camera access refused by the user or the browser.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Hardware the AR path needs is missing or unusable.
    #[error("Device unsupported: {0}")]
    DeviceUnsupported(String),

    /// No immersive AR runtime is available.
    #[error("AR runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The platform ended the session with a fault.
    #[error("Session fault: {0}")]
    SessionFault(String),

    /// An artwork id did not resolve in the catalog.
    #[error("Artwork not found: {0}")]
    NotFoundInCatalog(String),

    /// The operation is not valid in the current state.
    #[error("Precondition not met: {0}")]
    PreconditionNotMet(String),

    /// Configuration or catalog file could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    /// Stable snake_case class name reported to the host.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "permission_denied",
            Self::DeviceUnsupported(_) => "device_unsupported",
            Self::RuntimeUnavailable(_) => "runtime_unavailable",
            Self::SessionFault(_) => "session_fault",
            Self::NotFoundInCatalog(_) => "not_found_in_catalog",
            Self::PreconditionNotMet(_) => "precondition_not_met",
            Self::Config(_) => "config",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}

impl From<CapabilityFailure> for GalleryError {
    fn from(failure: CapabilityFailure) -> Self {
        let message = failure.to_string();
        match failure {
            CapabilityFailure::PermissionDenied => Self::PermissionDenied(message),
            CapabilityFailure::NoCameraDevice
            | CapabilityFailure::CameraBusy
            | CapabilityFailure::CameraError(_)
            | CapabilityFailure::SensorsAbsent => Self::DeviceUnsupported(message),
            CapabilityFailure::RuntimeAbsent => Self::RuntimeUnavailable(message),
        }
    }
}

impl From<SessionError> for GalleryError {
    fn from(error: SessionError) -> Self {
        Self::PreconditionNotMet(error.to_string())
    }
}

impl From<SessionFault> for GalleryError {
    fn from(fault: SessionFault) -> Self {
        Self::SessionFault(fault.message)
    }
}

impl From<ConfigError> for GalleryError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_failures_map_onto_taxonomy() {
        assert!(matches!(
            GalleryError::from(CapabilityFailure::PermissionDenied),
            GalleryError::PermissionDenied(_)
        ));
        assert!(matches!(
            GalleryError::from(CapabilityFailure::RuntimeAbsent),
            GalleryError::RuntimeUnavailable(_)
        ));
        assert!(matches!(
            GalleryError::from(CapabilityFailure::SensorsAbsent),
            GalleryError::DeviceUnsupported(_)
        ));
    }

    #[test]
    fn json_carries_kind_and_message() {
        let json = GalleryError::from(CapabilityFailure::RuntimeAbsent).to_json();
        assert_eq!(json["kind"], "runtime_unavailable");
        assert_eq!(json["message"], "AR runtime unavailable: AR runtime absent");
    }

    #[test]
    fn session_errors_are_precondition_failures() {
        let error = GalleryError::from(SessionError::AlreadyActive);
        assert!(matches!(error, GalleryError::PreconditionNotMet(_)));
    }
}
