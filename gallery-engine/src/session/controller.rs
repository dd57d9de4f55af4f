use bevy::prelude::*;
use thiserror::Error;

use super::fault::{PlatformError, SessionFault};
use super::state::{HitTestResult, PlacedObject, Pose, ReticleMarker, SessionPhase};
use crate::capability::{SupportState, SupportVerdict};
use crate::config::SessionOptions;
use constants::session::IMMERSIVE_AR_MODE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The capability check has not resolved yet.
    #[error("AR support check has not completed")]
    NotReady,

    #[error("AR is not supported on this device: {0}")]
    Unsupported(String),

    #[error("an AR session is already starting or active")]
    AlreadyActive,
}

/// Handed out by `start`; the host requests the platform session with these
/// options and echoes the epoch back once it is running.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTicket {
    epoch: u64,
    options: SessionOptions,
}

impl StartTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "epoch": self.epoch,
            "mode": IMMERSIVE_AR_MODE,
            "required_features": self.options.required_features,
            "optional_features": self.options.optional_features,
        })
    }
}

/// Owner of the one placement session.
#[derive(Resource, Debug, Default)]
pub struct PlacementSessionController {
    phase: SessionPhase,
    epoch: u64,
    reticle: Option<Pose>,
    placed: Vec<PlacedObject>,
    last_placed_at_ms: Option<u64>,
    fault: Option<SessionFault>,
    options: SessionOptions,
}

impl PlacementSessionController {
    /// Applies to the next start only.
    pub fn set_options(&mut self, options: SessionOptions) {
        self.options = options;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn is_surface_detected(&self) -> bool {
        self.is_active() && self.reticle.is_some()
    }

    pub fn reticle_pose(&self) -> Option<Pose> {
        self.reticle
    }

    pub fn placed_objects(&self) -> &[PlacedObject] {
        &self.placed
    }

    /// Last fault, kept until dismissed or a new start is requested.
    pub fn fault(&self) -> Option<&SessionFault> {
        self.fault.as_ref()
    }

    pub fn dismiss_fault(&mut self) {
        self.fault = None;
    }

    /// Idle -> Starting. The verdict must be resolved and supported.
    pub fn start(&mut self, verdict: &SupportVerdict) -> Result<StartTicket, SessionError> {
        match verdict.state {
            SupportState::Unknown => return Err(SessionError::NotReady),
            SupportState::Unsupported => {
                let reason = verdict
                    .reason
                    .as_ref()
                    .map_or_else(|| "unknown reason".to_string(), |r| r.to_string());
                return Err(SessionError::Unsupported(reason));
            }
            SupportState::Supported => {}
        }
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::AlreadyActive);
        }

        self.fault = None;
        self.phase = SessionPhase::Starting;
        info!("AR session starting (epoch {})", self.epoch);
        Ok(StartTicket {
            epoch: self.epoch,
            options: self.options.clone(),
        })
    }

    /// Starting -> Active, unless the start was cancelled in the meantime.
    pub fn confirm_started(&mut self, epoch: u64) -> bool {
        if self.phase != SessionPhase::Starting || epoch != self.epoch {
            debug!(
                "Ignoring session start for epoch {} (current {}, {:?})",
                epoch, self.epoch, self.phase
            );
            return false;
        }
        self.phase = SessionPhase::Active;
        self.reticle = None;
        info!("AR session active (epoch {})", self.epoch);
        true
    }

    /// Per-frame surface query result. Only touches the reticle.
    pub fn on_frame_hit_test(&mut self, result: &HitTestResult) {
        if !self.is_active() {
            return;
        }
        self.reticle = result.surface();
    }

    /// Append a placement at the reticle. Returns `None` without side effects
    /// when there is no active session, no detected surface or no artwork.
    pub fn commit_placement(
        &mut self,
        artwork_id: Option<&str>,
        scale: f32,
        rotation_degrees: f32,
        now_ms: u64,
    ) -> Option<&PlacedObject> {
        if !self.is_surface_detected() {
            return None;
        }
        let artwork_id = artwork_id?;
        let pose = self.reticle?;

        let placed_at_ms = match self.last_placed_at_ms {
            Some(last) => now_ms.max(last + 1),
            None => now_ms,
        };
        self.last_placed_at_ms = Some(placed_at_ms);

        self.placed.push(PlacedObject {
            artwork_id: artwork_id.to_string(),
            placed_at_ms,
            position: pose.position,
            scale: Vec3::splat(scale),
            rotation_y: rotation_degrees.to_radians(),
        });
        info!(
            "Placed artwork {} at {:?} (scale {}, rotation {} deg)",
            artwork_id, pose.position, scale, rotation_degrees
        );
        self.placed.last()
    }

    /// Any state -> Idle, discarding reticle and placements.
    pub fn end(&mut self) {
        if self.phase != SessionPhase::Idle {
            info!("AR session ended (epoch {})", self.epoch);
            self.epoch += 1;
        }
        self.phase = SessionPhase::Idle;
        self.reticle = None;
        self.placed.clear();
    }

    /// The platform reports its session has ended. A report tagged with an
    /// older epoch belongs to a session that was already ended here and must
    /// not cancel the current one. Returns whether the session was ended.
    pub fn on_platform_ended(&mut self, epoch: Option<u64>) -> bool {
        if epoch.is_some_and(|epoch| epoch != self.epoch) {
            debug!("Ignoring session end for stale epoch {:?}", epoch);
            return false;
        }
        let was_running = self.phase != SessionPhase::Idle;
        self.end();
        was_running
    }

    /// Platform fault: Starting/Active -> Idle and record the classified fault.
    /// Faults for other epochs, or while idle, are ignored.
    pub fn on_error(&mut self, error: &PlatformError) -> Option<&SessionFault> {
        if self.phase == SessionPhase::Idle {
            debug!("Ignoring session fault while idle: {:?}", error.code);
            return None;
        }
        if error.epoch.is_some_and(|epoch| epoch != self.epoch) {
            debug!("Ignoring session fault for stale epoch {:?}", error.epoch);
            return None;
        }

        let fault = SessionFault::classify(error);
        warn!("AR session fault: {} ({:?})", fault.message, fault.code);
        self.end();
        self.fault = Some(fault);
        self.fault.as_ref()
    }

    /// Reticle drawing data: only while active with a detected surface.
    pub fn reticle_marker(&self, controls_scale: f32) -> Option<ReticleMarker> {
        if !self.is_active() {
            return None;
        }
        self.reticle.map(|pose| ReticleMarker {
            pose,
            scale: controls_scale,
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "phase": self.phase,
            "epoch": self.epoch,
            "surface_detected": self.is_surface_detected(),
            "reticle": self.reticle.map(|pose| pose.to_json()),
            "placed": self.placed.iter().map(PlacedObject::to_json).collect::<Vec<_>>(),
            "fault": self.fault,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityFailure;
    use std::f32::consts::FRAC_PI_2;

    fn active() -> PlacementSessionController {
        let mut controller = PlacementSessionController::default();
        let ticket = controller.start(&SupportVerdict::supported()).unwrap();
        assert!(controller.confirm_started(ticket.epoch()));
        controller
    }

    fn surface_at(x: f32, y: f32, z: f32) -> HitTestResult {
        HitTestResult::hit(Pose::from_position(Vec3::new(x, y, z)))
    }

    #[test]
    fn start_requires_resolved_support() {
        let mut controller = PlacementSessionController::default();
        assert_eq!(
            controller.start(&SupportVerdict::default()),
            Err(SessionError::NotReady)
        );
        assert!(matches!(
            controller.start(&SupportVerdict::unsupported(CapabilityFailure::RuntimeAbsent)),
            Err(SessionError::Unsupported(_))
        ));
        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    #[test]
    fn start_ticket_carries_session_options() {
        let mut controller = PlacementSessionController::default();
        let ticket = controller.start(&SupportVerdict::supported()).unwrap();
        assert_eq!(ticket.options().required_features, vec!["hit-test"]);
        assert_eq!(ticket.options().optional_features, vec!["dom-overlay"]);
        assert_eq!(ticket.to_json()["mode"], "immersive-ar");
    }

    #[test]
    fn second_start_is_rejected() {
        let mut controller = PlacementSessionController::default();
        controller.start(&SupportVerdict::supported()).unwrap();
        assert_eq!(
            controller.start(&SupportVerdict::supported()),
            Err(SessionError::AlreadyActive)
        );
        assert_eq!(controller.phase(), SessionPhase::Starting);
    }

    #[test]
    fn hit_test_updates_reticle_only() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        assert!(controller.is_surface_detected());
        controller.commit_placement(Some("1"), 1.0, 0.0, 10);

        controller.on_frame_hit_test(&surface_at(1.0, 0.0, -1.0));
        controller.on_frame_hit_test(&HitTestResult::miss());
        assert!(!controller.is_surface_detected());
        assert!(controller.reticle_pose().is_none());
        assert_eq!(controller.placed_objects().len(), 1);
    }

    #[test]
    fn untracked_pose_is_not_a_surface() {
        let mut controller = active();
        controller.on_frame_hit_test(&HitTestResult {
            pose: Some(Pose::from_position(Vec3::ZERO)),
            is_tracking: false,
        });
        assert!(!controller.is_surface_detected());
    }

    #[test]
    fn commit_without_surface_is_noop() {
        let mut controller = active();
        assert!(controller.commit_placement(Some("1"), 1.0, 0.0, 5).is_none());
        assert!(controller.placed_objects().is_empty());
    }

    #[test]
    fn commit_without_selection_is_noop() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        assert!(controller.commit_placement(None, 1.0, 0.0, 5).is_none());
        assert!(controller.placed_objects().is_empty());
    }

    #[test]
    fn commit_snapshots_transform() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.5, 0.0, -2.0));
        let placed = controller
            .commit_placement(Some("3"), 2.0, 90.0, 1_000)
            .cloned()
            .unwrap();
        assert_eq!(placed.scale, Vec3::splat(2.0));
        assert!((placed.rotation_y - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(placed.position, Vec3::new(0.5, 0.0, -2.0));
    }

    #[test]
    fn placement_timestamps_are_monotonic() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        controller.commit_placement(Some("1"), 1.0, 0.0, 100);
        controller.commit_placement(Some("1"), 1.0, 0.0, 100);
        controller.commit_placement(Some("1"), 1.0, 0.0, 50);
        let stamps: Vec<u64> = controller
            .placed_objects()
            .iter()
            .map(|p| p.placed_at_ms)
            .collect();
        assert_eq!(stamps, vec![100, 101, 102]);
    }

    #[test]
    fn end_clears_everything_and_is_idempotent() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        controller.commit_placement(Some("1"), 1.0, 0.0, 1);
        controller.end();
        controller.end();
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert!(controller.placed_objects().is_empty());
        assert!(controller.reticle_pose().is_none());
    }

    #[test]
    fn end_during_start_cancels_continuation() {
        let mut controller = PlacementSessionController::default();
        let ticket = controller.start(&SupportVerdict::supported()).unwrap();
        controller.end();
        assert!(!controller.confirm_started(ticket.epoch()));
        assert_eq!(controller.phase(), SessionPhase::Idle);

        let retry = controller.start(&SupportVerdict::supported()).unwrap();
        assert_ne!(retry.epoch(), ticket.epoch());
        assert!(!controller.confirm_started(ticket.epoch()));
        assert!(controller.confirm_started(retry.epoch()));
    }

    #[test]
    fn fault_returns_to_idle_and_is_retryable() {
        let mut controller = active();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        controller.commit_placement(Some("1"), 1.0, 0.0, 1);

        let fault = controller
            .on_error(&PlatformError::with_code("AbortError"))
            .cloned()
            .unwrap();
        assert_eq!(fault.message, "The AR session was interrupted");
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert!(controller.reticle_pose().is_none());
        assert!(controller.placed_objects().is_empty());
        assert!(controller.fault().is_some());

        controller.start(&SupportVerdict::supported()).unwrap();
        assert!(controller.fault().is_none());
    }

    #[test]
    fn fault_while_idle_is_ignored() {
        let mut controller = PlacementSessionController::default();
        assert!(controller.on_error(&PlatformError::default()).is_none());
        assert!(controller.fault().is_none());
    }

    #[test]
    fn hit_test_ignored_unless_active() {
        let mut controller = PlacementSessionController::default();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        assert!(controller.reticle_pose().is_none());

        controller.start(&SupportVerdict::supported()).unwrap();
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        assert_eq!(controller.phase(), SessionPhase::Starting);
        assert!(controller.reticle_pose().is_none());
        assert!(!controller.is_surface_detected());
    }

    #[test]
    fn stale_platform_end_leaves_newer_start_alone() {
        let mut controller = active();
        let first_epoch = controller.epoch();
        controller.end();

        let ticket = controller.start(&SupportVerdict::supported()).unwrap();
        assert!(!controller.on_platform_ended(Some(first_epoch)));
        assert_eq!(controller.phase(), SessionPhase::Starting);
        assert!(controller.confirm_started(ticket.epoch()));

        assert!(controller.on_platform_ended(Some(ticket.epoch())));
        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    #[test]
    fn untagged_platform_end_always_ends() {
        let mut controller = active();
        assert!(controller.on_platform_ended(None));
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert!(!controller.on_platform_ended(None));
    }

    #[test]
    fn reticle_marker_tracks_controls_scale() {
        let mut controller = active();
        assert!(controller.reticle_marker(1.0).is_none());
        controller.on_frame_hit_test(&surface_at(0.0, 0.0, -1.0));
        let marker = controller.reticle_marker(1.4).unwrap();
        assert_eq!(marker.scale, 1.4);
    }
}
