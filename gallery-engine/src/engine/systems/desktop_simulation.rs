//! Native stand-in for the platform's immersive session.
//!
//! With `desktop_simulation` enabled the mouse ray against the ground plane
//! plays the per-frame hit test and a left click plays the select gesture.
//! Keyboard shortcuts drive the controls that the host page would otherwise
//! drive over RPC.
//!
//! | Key            | Action                        |
//! |----------------|-------------------------------|
//! | `1`-`9`        | Select the n-th artwork       |
//! | `S` / `Escape` | Start / end the session       |
//! | `=` / `-`      | Zoom in / out                 |
//! | `R`            | Rotate                        |
//! | `Backspace`    | Reset the view                |

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GalleryConfig;
use crate::rpc::handlers::{GalleryParams, commit_selected_placement, confirm_session_started};
use crate::session::{HitTestResult, Pose};

const GROUND_HEIGHT: f32 = 0.0;

/// Intersect a ray with the horizontal plane at `plane_y`. Only hits in front
/// of the ray origin count.
pub fn ray_ground_intersection(ray: Ray3d, plane_y: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 0.001 {
        return None;
    }
    let t = (plane_y - ray.origin.y) / ray.direction.y;
    if t > 0.0 {
        Some(ray.origin + ray.direction * t)
    } else {
        None
    }
}

pub fn simulation_enabled(config: Res<GalleryConfig>) -> bool {
    config.desktop_simulation
}

fn cursor_ground_hit(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<Camera3d>>,
) -> Option<Vec3> {
    let window = windows.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (cam_xform, camera) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(cam_xform, cursor_pos).ok()?;
    ray_ground_intersection(ray, GROUND_HEIGHT)
}

/// Feed the cursor's ground-plane hit into the session as a hit test.
pub fn simulate_hit_test(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut gallery: GalleryParams,
) {
    let mut ctx = gallery.context();
    if !ctx.session.is_active() {
        return;
    }

    let result = match cursor_ground_hit(&windows, &cameras) {
        Some(position) => HitTestResult::hit(Pose::from_position(position)),
        None => HitTestResult::miss(),
    };
    ctx.session.on_frame_hit_test(&result);
}

/// Left click commits a placement at the simulated reticle.
pub fn simulate_select(buttons: Res<ButtonInput<MouseButton>>, mut gallery: GalleryParams) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let mut ctx = gallery.context();
    commit_selected_placement(&mut ctx);
}

const SELECT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Keyboard shortcuts for the gallery controls.
pub fn handle_gallery_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut gallery: GalleryParams,
) {
    if keyboard.get_just_pressed().next().is_none() {
        return;
    }
    let mut ctx = gallery.context();

    for (index, key) in SELECT_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            let Some(id) = ctx.catalog.list_all().get(index).map(|a| a.id.clone()) else {
                continue;
            };
            if let Err(e) = ctx.view.select(&id, ctx.catalog, ctx.notifications) {
                warn!("Cannot select artwork {}: {}", id, e);
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        match ctx.session.start(ctx.support.verdict()) {
            // No platform to wait for: the session is running immediately.
            Ok(ticket) => {
                confirm_session_started(&mut ctx, ticket.epoch());
            }
            Err(e) => warn!("Cannot start simulated session: {}", e),
        }
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        ctx.session.end();
    }

    if keyboard.just_pressed(KeyCode::Equal) {
        ctx.view.controls_mut().zoom_in();
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        ctx.view.controls_mut().zoom_out();
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        ctx.view.controls_mut().rotate();
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        ctx.view.reset(ctx.notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::SupportStatus;
    use crate::catalog::{ArtworkCatalog, FavoriteSet};
    use crate::notify::Notifications;
    use crate::session::PlacementSessionController;
    use crate::view::ArViewState;

    fn shortcut_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ArtworkCatalog>()
            .init_resource::<FavoriteSet>()
            .init_resource::<SupportStatus>()
            .init_resource::<ArViewState>()
            .init_resource::<PlacementSessionController>()
            .init_resource::<Notifications>()
            .add_systems(Update, handle_gallery_keyboard_shortcuts);
        app
    }

    #[test]
    fn digit_keys_select_by_catalog_position() {
        let mut app = shortcut_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit2);
        app.update();

        assert_eq!(app.world().resource::<ArViewState>().selected_id(), Some("2"));
    }

    #[test]
    fn digit_past_catalog_end_keeps_selection() {
        let mut app = shortcut_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Digit9);
        app.update();

        assert!(app.world().resource::<ArViewState>().selected_id().is_none());
        assert!(app.world().resource::<Notifications>().is_empty());
    }

    #[test]
    fn start_key_without_support_leaves_session_idle() {
        let mut app = shortcut_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyS);
        app.update();

        assert!(!app.world().resource::<PlacementSessionController>().is_active());
    }

    #[test]
    fn downward_ray_hits_ground() {
        let ray = Ray3d::new(Vec3::new(1.0, 2.0, 0.0), Dir3::NEG_Y);
        assert_eq!(ray_ground_intersection(ray, 0.0), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn upward_or_parallel_rays_miss() {
        assert!(ray_ground_intersection(Ray3d::new(Vec3::Y, Dir3::Y), 0.0).is_none());
        assert!(ray_ground_intersection(Ray3d::new(Vec3::Y, Dir3::X), 0.0).is_none());
    }
}
