use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::config::GalleryConfig;
use crate::session::PlacementSessionController;
use crate::view::ArViewState;
use constants::render_settings::RETICLE_COLOUR;

/// Root following the reticle pose.
#[derive(Component)]
pub struct Reticle;

/// The flat ring under the reticle root.
#[derive(Component)]
pub struct ReticleRing;

fn ring_mesh(config: &GalleryConfig) -> Mesh {
    Annulus::new(config.reticle.inner_radius, config.reticle.outer_radius).into()
}

pub fn spawn_reticle(
    mut commands: Commands,
    config: Res<GalleryConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let [r, g, b, a] = RETICLE_COLOUR;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::Hidden,
            Reticle,
            Name::new("reticle"),
        ))
        .with_children(|parent| {
            // Annulus meshes face +Z; lay the ring on the surface.
            parent.spawn((
                Mesh3d(meshes.add(ring_mesh(&config))),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                ReticleRing,
            ));
        });
}

/// Rebuild the ring when configured radii change.
pub fn refresh_reticle_mesh(
    config: Res<GalleryConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut rings: Query<&mut Mesh3d, With<ReticleRing>>,
) {
    if !config.is_changed() || config.is_added() {
        return;
    }
    for mut mesh in &mut rings {
        mesh.0 = meshes.add(ring_mesh(&config));
    }
}

/// Draw the reticle at the detected surface, scaled by the pending
/// placement scale. Hidden without an active session or a surface.
pub fn update_reticle(
    session: Res<PlacementSessionController>,
    view: Res<ArViewState>,
    mut reticles: Query<(&mut Transform, &mut Visibility), With<Reticle>>,
) {
    let marker = session.reticle_marker(view.controls().scale());
    for (mut transform, mut visibility) in &mut reticles {
        match marker {
            Some(marker) => {
                *transform = Transform {
                    translation: marker.pose.position,
                    rotation: marker.pose.orientation,
                    scale: Vec3::splat(marker.scale),
                };
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

pub fn hide_reticle(mut reticles: Query<&mut Visibility, With<Reticle>>) {
    for mut visibility in &mut reticles {
        *visibility = Visibility::Hidden;
    }
}
