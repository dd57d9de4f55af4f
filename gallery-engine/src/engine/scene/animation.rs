use bevy::prelude::*;

use super::models::ArtworkModel;
use crate::catalog::AnimationMode;
use constants::render_settings::{FLOW_ANIMATION_SPEED, FLOW_BOB_AMPLITUDE, ROTATE_ANIMATION_SPEED};

/// Advance one frame of an idle animation.
pub fn animate_model(mode: AnimationMode, transform: &mut Transform, delta: f32, elapsed: f32) {
    match mode {
        AnimationMode::Rotate => transform.rotate_y(delta * ROTATE_ANIMATION_SPEED),
        AnimationMode::Flow => {
            transform.rotate_y(delta * FLOW_ANIMATION_SPEED);
            transform.translation.y = elapsed.sin() * FLOW_BOB_AMPLITUDE;
        }
    }
}

pub fn animate_artwork_models(time: Res<Time>, mut models: Query<(&ArtworkModel, &mut Transform)>) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();
    for (model, mut transform) in &mut models {
        if let Some(mode) = model.animation {
            animate_model(mode, &mut transform, delta, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_spins_half_radian_per_second() {
        let mut transform = Transform::default();
        animate_model(AnimationMode::Rotate, &mut transform, 1.0, 1.0);
        let (_, angle) = transform.rotation.to_axis_angle();
        assert!((angle - 0.5).abs() < 1e-5);
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn flow_bobs_within_amplitude() {
        let mut transform = Transform::default();
        for step in 0..100 {
            animate_model(AnimationMode::Flow, &mut transform, 0.1, step as f32 * 0.1);
            assert!(transform.translation.y.abs() <= FLOW_BOB_AMPLITUDE + 1e-6);
        }
    }
}
