use bevy::prelude::*;

use crate::catalog::ArtworkRecord;
use constants::render_settings::{
    ARTIST_FONT_SIZE, ARTIST_LABEL_OFFSET, TITLE_FONT_SIZE, TITLE_LABEL_OFFSET,
};

/// Screen-space text pinned below a world-space entity.
#[derive(Component)]
pub struct ArtworkLabel {
    pub target: Entity,
    /// Offset along the target's local Y axis.
    pub offset: f32,
}

/// Title and artist labels for a placed artwork.
pub fn spawn_artwork_labels(commands: &mut Commands, target: Entity, artwork: &ArtworkRecord) {
    let labels = [
        (
            artwork.title.clone(),
            TITLE_LABEL_OFFSET,
            TITLE_FONT_SIZE,
            Color::WHITE,
        ),
        (
            artwork.artist.clone(),
            ARTIST_LABEL_OFFSET,
            ARTIST_FONT_SIZE,
            Color::srgb(0.8, 0.8, 0.8),
        ),
    ];

    for (text, offset, font_size, colour) in labels {
        commands.spawn((
            Text::new(text),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(colour),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            ArtworkLabel { target, offset },
        ));
    }
}

/// Project labels onto the viewport each frame. Labels whose target is gone
/// are despawned; labels behind the camera are hidden.
pub fn update_artwork_labels(
    mut commands: Commands,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    targets: Query<&GlobalTransform>,
    mut labels: Query<(Entity, &ArtworkLabel, &mut Node, &ComputedNode, &mut Visibility)>,
) {
    let Ok((cam_xform, camera)) = cameras.single() else {
        return;
    };

    for (entity, label, mut node, computed, mut visibility) in &mut labels {
        let Ok(target) = targets.get(label.target) else {
            commands.entity(entity).despawn();
            continue;
        };

        let anchor = target.transform_point(Vec3::new(0.0, label.offset, 0.0));
        match camera.world_to_viewport(cam_xform, anchor) {
            Ok(screen) => {
                let half_size = computed.size() * computed.inverse_scale_factor() * 0.5;
                node.left = Val::Px(screen.x - half_size.x);
                node.top = Val::Px(screen.y - half_size.y);
                *visibility = Visibility::Inherited;
            }
            Err(_) => *visibility = Visibility::Hidden,
        }
    }
}
