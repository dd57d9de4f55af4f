//! Placement session lifecycle.
//!
//! ```text
//!        start() ok                confirm_started(epoch)
//! Idle ─────────────> Starting ─────────────────────────> Active { surface? }
//!  ^                     │                                    │
//!  └──── end() / on_error() ───────────────────────────────────┘
//! ```
//!
//! The controller is driven explicitly: the host reports session start,
//! per-frame hit tests, select gestures and faults, and the scene systems
//! read the reticle and placed objects back every frame. Each `end()` or
//! fault advances the epoch so a start continuation issued before it is
//! ignored when it finally arrives.

/// The session state machine.
pub mod controller;

/// Platform error classification.
pub mod fault;

/// Poses, hit-test results and placed objects.
pub mod state;

pub use controller::{PlacementSessionController, SessionError, StartTicket};
pub use fault::{PlatformError, SessionFault, SessionFaultKind};
pub use state::{
    HitTestResult, PlacedObject, PlacementKey, Pose, ReticleMarker, SessionPhase, wall_clock_ms,
};
