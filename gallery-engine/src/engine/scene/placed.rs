use std::collections::HashSet;

use bevy::prelude::*;

use super::labels::spawn_artwork_labels;
use super::models::spawn_artwork_model;
use crate::catalog::ArtworkCatalog;
use crate::session::{PlacementKey, PlacementSessionController};

/// Root of a placed artwork; carries the stored pose, scale and rotation.
#[derive(Component)]
pub struct PlacedArtwork;

/// Mirror the session's placed list into the scene. Entities are created once
/// per placement and never re-posed, so later control changes leave them as
/// committed.
pub fn sync_placed_artworks(
    session: Res<PlacementSessionController>,
    catalog: Res<ArtworkCatalog>,
    placed_query: Query<(Entity, &PlacementKey), With<PlacedArtwork>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !session.is_changed() {
        return;
    }

    let wanted: HashSet<PlacementKey> = session
        .placed_objects()
        .iter()
        .map(|placed| placed.key())
        .collect();

    let mut existing = HashSet::new();
    for (entity, key) in &placed_query {
        if wanted.contains(key) {
            existing.insert(key.clone());
        } else {
            commands.entity(entity).despawn();
        }
    }

    for placed in session.placed_objects() {
        let key = placed.key();
        if existing.contains(&key) {
            continue;
        }
        let Some(artwork) = catalog.get_by_id(&placed.artwork_id) else {
            warn!("Placed artwork {} is no longer in the catalog", placed.artwork_id);
            continue;
        };

        let model = spawn_artwork_model(
            &mut commands,
            &mut meshes,
            &mut materials,
            artwork,
            Transform::from_scale(Vec3::splat(artwork.scale_hint)),
        );
        let root = commands
            .spawn((
                placed.transform(),
                Visibility::default(),
                PlacedArtwork,
                key,
                Name::new(format!("placed_{}_{}", placed.artwork_id, placed.placed_at_ms)),
            ))
            .add_child(model)
            .id();
        spawn_artwork_labels(&mut commands, root, artwork);
        debug!("Spawned placed artwork {}", placed.artwork_id);
    }
}

/// Leaving the interactive state ends any session and clears its objects.
pub fn clear_placed_artworks(
    mut session: ResMut<PlacementSessionController>,
    placed_query: Query<Entity, With<PlacedArtwork>>,
    mut commands: Commands,
) {
    session.end();
    for entity in &placed_query {
        commands.entity(entity).despawn();
    }
}
