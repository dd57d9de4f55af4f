use bevy::prelude::*;

use super::models::spawn_artwork_model;
use crate::catalog::ArtworkCatalog;
use crate::view::ArViewState;
use constants::render_settings::PREVIEW_TURNTABLE_SPEED;

const PREVIEW_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Turntable root of the static preview.
#[derive(Component)]
pub struct PreviewTurntable {
    pub artwork_id: String,
}

/// Show the selected artwork on the turntable, replacing whatever was shown
/// before. Nothing is shown without a selection.
pub fn sync_preview_model(
    view: Res<ArViewState>,
    catalog: Res<ArtworkCatalog>,
    turntables: Query<(Entity, &PreviewTurntable)>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let selected = view.selected(&catalog);
    let shown = turntables.iter().next();

    if let (Some(artwork), Some((_, turntable))) = (selected, shown) {
        if turntable.artwork_id == artwork.id {
            return;
        }
    }
    if selected.is_none() && shown.is_none() {
        return;
    }

    for (entity, _) in &turntables {
        commands.entity(entity).despawn();
    }
    let Some(artwork) = selected else {
        return;
    };

    info!("Previewing artwork {}", artwork.id);
    let model = spawn_artwork_model(
        &mut commands,
        &mut meshes,
        &mut materials,
        artwork,
        Transform::from_scale(Vec3::splat(artwork.scale_hint)),
    );
    commands
        .spawn((
            Transform::from_translation(PREVIEW_POSITION),
            Visibility::default(),
            PreviewTurntable {
                artwork_id: artwork.id.clone(),
            },
            Name::new("preview_turntable"),
        ))
        .add_child(model);
}

pub fn spin_turntable(time: Res<Time>, mut turntables: Query<&mut Transform, With<PreviewTurntable>>) {
    for mut transform in &mut turntables {
        transform.rotate_y(time.delta_secs() * PREVIEW_TURNTABLE_SPEED);
    }
}

pub fn clear_preview(mut commands: Commands, turntables: Query<Entity, With<PreviewTurntable>>) {
    for entity in &turntables {
        commands.entity(entity).despawn();
    }
}
