use bevy::prelude::*;
use serde::Serialize;

/// World-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position.to_array(),
            "orientation": self.orientation.to_array(),
        })
    }
}

/// One frame's hit-test report from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitTestResult {
    pub pose: Option<Pose>,
    pub is_tracking: bool,
}

impl HitTestResult {
    pub fn hit(pose: Pose) -> Self {
        Self {
            pose: Some(pose),
            is_tracking: true,
        }
    }

    pub fn miss() -> Self {
        Self::default()
    }

    /// The surface pose, when tracking produced one.
    pub fn surface(&self) -> Option<Pose> {
        if self.is_tracking { self.pose } else { None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Starting,
    Active,
}

/// Identity of a placed object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Component)]
pub struct PlacementKey {
    pub artwork_id: String,
    pub placed_at_ms: u64,
}

/// An artwork committed into the current session. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub artwork_id: String,
    /// Monotonic within a controller.
    pub placed_at_ms: u64,
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation about the vertical axis, radians.
    pub rotation_y: f32,
}

impl PlacedObject {
    pub fn key(&self) -> PlacementKey {
        PlacementKey {
            artwork_id: self.artwork_id.clone(),
            placed_at_ms: self.placed_at_ms,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_rotation_y(self.rotation_y),
            scale: self.scale,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{}-{}", self.artwork_id, self.placed_at_ms),
            "artwork_id": self.artwork_id,
            "placed_at_ms": self.placed_at_ms,
            "position": self.position.to_array(),
            "scale": self.scale.to_array(),
            "rotation": self.rotation_y,
        })
    }
}

/// Where and how large the reticle is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleMarker {
    pub pose: Pose,
    pub scale: f32,
}

/// Milliseconds since the Unix epoch, used to stamp placements.
pub fn wall_clock_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}
