use bevy::prelude::*;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, MediaStream, MediaStreamConstraints, MediaStreamTrack, window};

use super::{CameraProbeError, CameraStream, CapabilityProvider, SensorPresence};
use constants::session::IMMERSIVE_AR_MODE;

/// Camera stream acquired by `getUserMedia`.
pub struct WebCameraStream(MediaStream);

impl CameraStream for WebCameraStream {
    fn release(self) {
        let tracks: Array = self.0.get_tracks();
        for track in tracks.iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// Capability provider for browsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCapabilities;

impl WebCapabilities {
    fn classify_camera_error(error: &JsValue) -> CameraProbeError {
        let Some(exception) = error.dyn_ref::<DomException>() else {
            return CameraProbeError::Other(format!("{:?}", error));
        };
        match exception.name().as_str() {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => {
                CameraProbeError::PermissionDenied
            }
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => {
                CameraProbeError::NoDevice
            }
            "NotReadableError" | "TrackStartError" | "AbortError" => CameraProbeError::Busy,
            other => CameraProbeError::Other(format!("{}: {}", other, exception.message())),
        }
    }

    fn video_constraints(facing_mode: &str) -> Result<MediaStreamConstraints, JsValue> {
        let video = Object::new();
        Reflect::set(&video, &"facingMode".into(), &JsValue::from_str(facing_mode))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);
        Ok(constraints)
    }
}

impl CapabilityProvider for WebCapabilities {
    type Stream = WebCameraStream;

    async fn request_camera(&self, facing_mode: &str) -> Result<Self::Stream, CameraProbeError> {
        let window = window().ok_or_else(|| CameraProbeError::Other("no window".to_string()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| CameraProbeError::NoDevice)?;
        let constraints = Self::video_constraints(facing_mode)
            .map_err(|e| CameraProbeError::Other(format!("{:?}", e)))?;
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| Self::classify_camera_error(&e))?;

        let value = JsFuture::from(promise)
            .await
            .map_err(|e| Self::classify_camera_error(&e))?;
        let stream = value
            .dyn_into::<MediaStream>()
            .map_err(|_| CameraProbeError::Other("getUserMedia returned no stream".to_string()))?;
        Ok(WebCameraStream(stream))
    }

    async fn is_immersive_ar_supported(&self) -> bool {
        let Some(window) = window() else {
            return false;
        };
        let navigator = window.navigator();
        let Ok(xr) = Reflect::get(&navigator, &"xr".into()) else {
            return false;
        };
        if xr.is_undefined() || xr.is_null() {
            info!("navigator.xr is not available");
            return false;
        }

        let Ok(is_supported) = Reflect::get(&xr, &"isSessionSupported".into())
            .and_then(|f| f.dyn_into::<Function>().map_err(JsValue::from))
        else {
            return false;
        };
        let Ok(promise) = is_supported
            .call1(&xr, &JsValue::from_str(IMMERSIVE_AR_MODE))
            .and_then(|p| p.dyn_into::<Promise>().map_err(JsValue::from))
        else {
            return false;
        };

        match JsFuture::from(promise).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                error!("isSessionSupported failed: {:?}", e);
                false
            }
        }
    }

    fn sensors(&self) -> SensorPresence {
        let Some(window) = window() else {
            return SensorPresence::default();
        };
        let has = |name: &str| Reflect::has(&window, &JsValue::from_str(name)).unwrap_or(false);
        SensorPresence {
            motion: has("DeviceMotionEvent"),
            orientation: has("DeviceOrientationEvent"),
        }
    }
}
