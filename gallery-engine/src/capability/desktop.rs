use super::{CameraProbeError, CameraStream, CapabilityProvider, SensorPresence};

/// Stand-in camera handle for native builds.
pub struct SimulatedStream;

impl CameraStream for SimulatedStream {
    fn release(self) {}
}

/// Capability provider for native builds.
///
/// Without simulation there is no immersive runtime and the AR path is
/// reported unsupported, routing the app to the static preview. With
/// simulation the desktop window stands in for runtime and sensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopCapabilities {
    pub simulate: bool,
}

impl CapabilityProvider for DesktopCapabilities {
    type Stream = SimulatedStream;

    async fn request_camera(&self, _facing_mode: &str) -> Result<Self::Stream, CameraProbeError> {
        Ok(SimulatedStream)
    }

    async fn is_immersive_ar_supported(&self) -> bool {
        self.simulate
    }

    fn sensors(&self) -> SensorPresence {
        SensorPresence {
            motion: self.simulate,
            orientation: self.simulate,
        }
    }
}
