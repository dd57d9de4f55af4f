//! Scale and rotation applied to the next placement.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::TransformLimits;
use constants::transform::FULL_TURN_DEGREES;

/// Clamped value holder read by `commit_placement`. Changing it never touches
/// objects that are already placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformControls {
    scale: f32,
    rotation_degrees: f32,
    #[serde(skip)]
    limits: TransformLimits,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self::with_limits(TransformLimits::default())
    }
}

impl TransformControls {
    pub fn with_limits(limits: TransformLimits) -> Self {
        Self {
            scale: limits.default_scale,
            rotation_degrees: 0.0,
            limits,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Swap limits, re-clamping the current scale into the new range.
    pub fn set_limits(&mut self, limits: TransformLimits) {
        self.limits = limits;
        self.scale = self.scale.clamp(limits.min_scale, limits.max_scale);
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.scale = (self.scale + self.limits.zoom_step).min(self.limits.max_scale);
        self.scale
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.scale = (self.scale - self.limits.zoom_step).max(self.limits.min_scale);
        self.scale
    }

    pub fn rotate(&mut self) -> f32 {
        self.rotation_degrees =
            (self.rotation_degrees + self.limits.rotate_step_degrees).rem_euclid(FULL_TURN_DEGREES);
        self.rotation_degrees
    }

    pub fn reset(&mut self) {
        self.scale = self.limits.default_scale;
        self.rotation_degrees = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zoom_in_saturates_at_max() {
        let mut controls = TransformControls::default();
        for _ in 0..20 {
            controls.zoom_in();
        }
        assert_eq!(controls.scale(), 3.0);
    }

    #[test]
    fn zoom_out_saturates_at_min() {
        let mut controls = TransformControls::default();
        for _ in 0..20 {
            controls.zoom_out();
        }
        assert_eq!(controls.scale(), 0.2);
    }

    #[test]
    fn eight_rotations_return_to_zero() {
        let mut controls = TransformControls::default();
        for _ in 0..8 {
            controls.rotate();
        }
        assert_eq!(controls.rotation_degrees(), 0.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut controls = TransformControls::default();
        controls.zoom_in();
        controls.rotate();
        controls.reset();
        assert_eq!(controls.scale(), 1.0);
        assert_eq!(controls.rotation_degrees(), 0.0);
    }

    #[test]
    fn narrower_limits_reclamp_scale() {
        let mut controls = TransformControls::default();
        for _ in 0..10 {
            controls.zoom_in();
        }
        controls.set_limits(TransformLimits {
            max_scale: 2.0,
            ..TransformLimits::default()
        });
        assert_eq!(controls.scale(), 2.0);
    }

    proptest! {
        #[test]
        fn scale_stays_within_bounds(steps in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut controls = TransformControls::default();
            for zoom_in in steps {
                if zoom_in { controls.zoom_in(); } else { controls.zoom_out(); }
                prop_assert!(controls.scale() >= 0.2 && controls.scale() <= 3.0);
            }
        }

        #[test]
        fn rotation_stays_within_full_turn(count in 0usize..100) {
            let mut controls = TransformControls::default();
            for _ in 0..count {
                controls.rotate();
            }
            prop_assert!(controls.rotation_degrees() >= 0.0 && controls.rotation_degrees() < 360.0);
            prop_assert_eq!(controls.rotation_degrees(), ((count * 45) % 360) as f32);
        }
    }
}
