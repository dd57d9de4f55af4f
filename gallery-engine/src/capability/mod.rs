//! Capability detection for the interactive AR path.
//!
//! The probe is an ordered checklist over a [`CapabilityProvider`]:
//!
//! ```text
//! camera permission ──fail──> Unsupported(permission / no device / busy / error)
//!        │ ok (stream released immediately)
//! immersive-ar flag ──fail──> Unsupported(AR runtime absent)
//!        │ ok
//! motion/orientation ─none──> Unsupported(sensors absent)
//!        │ any present
//!    Supported
//! ```
//!
//! [`SupportStatus`] owns the resolved verdict. Each probe is issued a
//! [`ProbeTicket`]; a result from a superseded probe is discarded so a slow
//! first check can never overwrite a later retry.

/// Native provider: absent runtime, or a simulated one for desktop testing.
pub mod desktop;

/// Browser provider backed by `navigator.mediaDevices` and `navigator.xr`.
#[cfg(target_arch = "wasm32")]
pub mod web;

use bevy::prelude::*;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::notify::{Notification, Notifications};
use constants::session::{PROBE_FACING_MODE, REASON_RUNTIME_ABSENT, REASON_SENSORS_ABSENT};

/// Why the interactive AR path is unavailable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityFailure {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    NoCameraDevice,

    #[error("camera is in use by another application")]
    CameraBusy,

    #[error("camera error: {0}")]
    CameraError(String),

    #[error("{}", REASON_RUNTIME_ABSENT)]
    RuntimeAbsent,

    #[error("{}", REASON_SENSORS_ABSENT)]
    SensorsAbsent,
}

impl CapabilityFailure {
    /// Description shown to the user alongside the static preview.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Camera permission was denied. Allow camera access in your browser settings to use AR."
            }
            Self::NoCameraDevice => "No camera was found on this device. A preview is shown instead.",
            Self::CameraBusy => {
                "The camera is being used by another application. Close it and try again."
            }
            Self::CameraError(_) => "The camera could not be started. A preview is shown instead.",
            Self::RuntimeAbsent => {
                "Your browser does not support WebXR augmented reality. Try Chrome or Safari on a compatible mobile device."
            }
            Self::SensorsAbsent => {
                "This device has no motion sensors, which AR tracking requires. A preview is shown instead."
            }
        }
    }
}

/// Camera-request failure as classified by a provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraProbeError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("no device")]
    NoDevice,
    #[error("device busy")]
    Busy,
    #[error("{0}")]
    Other(String),
}

impl From<CameraProbeError> for CapabilityFailure {
    fn from(error: CameraProbeError) -> Self {
        match error {
            CameraProbeError::PermissionDenied => Self::PermissionDenied,
            CameraProbeError::NoDevice => Self::NoCameraDevice,
            CameraProbeError::Busy => Self::CameraBusy,
            CameraProbeError::Other(message) => Self::CameraError(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorPresence {
    pub motion: bool,
    pub orientation: bool,
}

impl SensorPresence {
    pub fn any(&self) -> bool {
        self.motion || self.orientation
    }
}

/// A camera handle acquired during the probe. Dropping the handle without
/// calling `release` is a provider bug; the probe always releases it.
pub trait CameraStream {
    fn release(self);
}

/// Narrow query surface over the platform's camera, AR runtime and sensors.
#[allow(async_fn_in_trait)]
pub trait CapabilityProvider {
    type Stream: CameraStream;

    /// Request a video stream, preferring the given facing mode.
    async fn request_camera(&self, facing_mode: &str) -> Result<Self::Stream, CameraProbeError>;

    /// Whether an `immersive-ar` session type is supported.
    async fn is_immersive_ar_supported(&self) -> bool;

    fn sensors(&self) -> SensorPresence;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportState {
    /// Check in progress, nothing resolved yet.
    #[default]
    Unknown,
    Supported,
    Unsupported,
}

/// Tri-state verdict plus the failure reason when unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SupportVerdict {
    pub state: SupportState,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: Option<CapabilityFailure>,
}

fn serialize_reason<S: Serializer>(
    reason: &Option<CapabilityFailure>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match reason {
        Some(failure) => serializer.serialize_some(&failure.to_string()),
        None => serializer.serialize_none(),
    }
}

impl SupportVerdict {
    pub fn supported() -> Self {
        Self {
            state: SupportState::Supported,
            reason: None,
        }
    }

    pub fn unsupported(reason: CapabilityFailure) -> Self {
        Self {
            state: SupportState::Unsupported,
            reason: Some(reason),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.state == SupportState::Supported
    }

    pub fn is_resolved(&self) -> bool {
        self.state != SupportState::Unknown
    }

    /// The single notification announcing this verdict.
    pub fn notification(&self) -> Option<Notification> {
        match (&self.state, &self.reason) {
            (SupportState::Supported, _) => Some(Notification::info(
                "AR ready",
                "Choose an artwork and move your device to find a surface.",
            )),
            (SupportState::Unsupported, Some(reason)) => Some(Notification::destructive(
                "AR not available",
                reason.user_message(),
            )),
            (SupportState::Unsupported, None) => Some(Notification::destructive(
                "AR not available",
                "Augmented reality is not available on this device.",
            )),
            (SupportState::Unknown, _) => None,
        }
    }
}

/// Run the ordered capability checklist.
pub async fn check_support<P: CapabilityProvider>(provider: &P) -> SupportVerdict {
    match provider.request_camera(PROBE_FACING_MODE).await {
        Ok(stream) => stream.release(),
        Err(error) => {
            warn!("Camera probe failed: {}", error);
            return SupportVerdict::unsupported(error.into());
        }
    }

    if !provider.is_immersive_ar_supported().await {
        warn!("Immersive AR session type not supported");
        return SupportVerdict::unsupported(CapabilityFailure::RuntimeAbsent);
    }

    if !provider.sensors().any() {
        warn!("No motion or orientation sensors present");
        return SupportVerdict::unsupported(CapabilityFailure::SensorsAbsent);
    }

    info!("AR capability probe passed");
    SupportVerdict::supported()
}

/// Identifies one probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    generation: u64,
}

/// Owner of the app-wide support verdict.
#[derive(Resource, Debug, Default)]
pub struct SupportStatus {
    verdict: SupportVerdict,
    generation: u64,
    checking: bool,
}

impl SupportStatus {
    pub fn verdict(&self) -> &SupportVerdict {
        &self.verdict
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// Start a probe run. Any run started earlier becomes stale. The current
    /// verdict stays observable until the new run resolves.
    pub fn begin_check(&mut self) -> ProbeTicket {
        self.generation += 1;
        self.checking = true;
        ProbeTicket {
            generation: self.generation,
        }
    }

    /// Record a probe result and emit its notification. Returns `false` when
    /// the ticket is stale or the verdict is not resolved.
    pub fn resolve(
        &mut self,
        ticket: ProbeTicket,
        verdict: SupportVerdict,
        notifications: &mut Notifications,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale capability probe {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        if !verdict.is_resolved() {
            warn!("Capability probe returned an unresolved verdict");
            return false;
        }

        info!("AR support resolved: {:?}", verdict.state);
        if let Some(notification) = verdict.notification() {
            notifications.push(notification);
        }
        self.verdict = verdict;
        self.checking = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ticket_is_discarded() {
        let mut status = SupportStatus::default();
        let mut notifications = Notifications::default();

        let first = status.begin_check();
        let second = status.begin_check();

        assert!(status.resolve(second, SupportVerdict::supported(), &mut notifications));
        assert!(!status.resolve(
            first,
            SupportVerdict::unsupported(CapabilityFailure::RuntimeAbsent),
            &mut notifications
        ));
        assert!(status.verdict().is_supported());
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn one_notification_per_resolution() {
        let mut status = SupportStatus::default();
        let mut notifications = Notifications::default();

        let ticket = status.begin_check();
        status.resolve(
            ticket,
            SupportVerdict::unsupported(CapabilityFailure::SensorsAbsent),
            &mut notifications,
        );
        assert_eq!(notifications.len(), 1);
        assert!(!status.is_checking());

        let retry = status.begin_check();
        assert!(status.is_checking());
        assert_eq!(status.verdict().state, SupportState::Unsupported);
        status.resolve(retry, SupportVerdict::supported(), &mut notifications);
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn unknown_verdict_never_overwrites() {
        let mut status = SupportStatus::default();
        let mut notifications = Notifications::default();
        let ticket = status.begin_check();
        status.resolve(ticket, SupportVerdict::supported(), &mut notifications);

        let retry = status.begin_check();
        assert!(!status.resolve(retry, SupportVerdict::default(), &mut notifications));
        assert!(status.verdict().is_supported());
    }

    #[test]
    fn verdict_serializes_reason_text() {
        let json = serde_json::to_value(SupportVerdict::unsupported(CapabilityFailure::RuntimeAbsent))
            .unwrap();
        assert_eq!(json["state"], "unsupported");
        assert_eq!(json["reason"], "AR runtime absent");
    }
}
