use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::catalog::{AnimationMode, ArtworkRecord, RenderHint, ShapeKind};
use constants::render_settings::{
    KNOT_RADIAL_SEGMENTS, KNOT_RADIUS, KNOT_TUBE_RADIUS, KNOT_TUBULAR_SEGMENTS, PARTICLE_COUNT,
    PARTICLE_RADIUS,
};

/// The animated part of an artwork model.
#[derive(Component, Debug, Clone)]
pub struct ArtworkModel {
    pub artwork_id: String,
    pub animation: Option<AnimationMode>,
}

/// Build the (2,3) torus knot used for knot render hints.
///
/// Tube rings are swept along the knot curve using a frame from the curve
/// tangent and the sum of neighbouring curve points.
pub fn create_torus_knot_mesh(
    radius: f32,
    tube_radius: f32,
    tubular_segments: usize,
    radial_segments: usize,
    p: f32,
    q: f32,
) -> Mesh {
    let curve = |u: f32| {
        let quo = q / p * u;
        let cs = quo.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * quo.sin() * 0.5,
        )
    };

    let ring = radial_segments + 1;
    let mut positions = Vec::with_capacity((tubular_segments + 1) * ring);
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut uvs = Vec::with_capacity(positions.capacity());

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube_radius * v.cos();
            let cy = tube_radius * v.sin();
            let vertex = p1 + normal * cx + binormal * cy;

            positions.push(vertex.to_array());
            normals.push((vertex - p1).normalize_or_zero().to_array());
            uvs.push([
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
    for i in 1..=tubular_segments {
        for j in 1..=radial_segments {
            let a = (ring * (i - 1) + (j - 1)) as u32;
            let b = (ring * i + (j - 1)) as u32;
            let c = (ring * i + j) as u32;
            let d = (ring * (i - 1) + j) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Deterministic spread of `count` points filling a box of `dimensions`.
///
/// Points follow a golden-angle spiral over the unit sphere with radii growing
/// by cube root, then stretched to the box half extents.
pub fn particle_offsets(dimensions: [f32; 3], count: usize) -> Vec<Vec3> {
    let half = Vec3::from_array(dimensions) * 0.5;
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|i| {
            let t = (i as f32 + 0.5) / count as f32;
            let y = 1.0 - 2.0 * t;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            let radius = t.cbrt();
            Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius * half
        })
        .collect()
}

fn base_colour(hint: &RenderHint) -> Color {
    hint.colour_rgb()
        .map_or(Color::WHITE, |[r, g, b]| Color::srgb(r, g, b))
}

/// Mesh for single-mesh shapes. Particles are built separately.
fn shape_mesh(hint: &RenderHint) -> Mesh {
    let [x, y, z] = hint.dimensions;
    match hint.shape {
        ShapeKind::Box | ShapeKind::Particles => Cuboid::new(x, y, z).into(),
        ShapeKind::Sphere => Sphere::new(x).mesh().uv(32, 32),
        ShapeKind::Plane => Rectangle::new(x, y).into(),
        ShapeKind::Knot => create_torus_knot_mesh(
            KNOT_RADIUS,
            KNOT_TUBE_RADIUS,
            KNOT_TUBULAR_SEGMENTS,
            KNOT_RADIAL_SEGMENTS,
            2.0,
            3.0,
        ),
    }
}

/// Spawn an artwork model and return its entity. The caller positions it.
pub fn spawn_artwork_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    artwork: &ArtworkRecord,
    transform: Transform,
) -> Entity {
    let hint = &artwork.render_hint;
    let colour = base_colour(hint);

    let model = commands
        .spawn((
            transform,
            Visibility::default(),
            ArtworkModel {
                artwork_id: artwork.id.clone(),
                animation: hint.animation,
            },
            Name::new(format!("artwork_{}", artwork.id)),
        ))
        .id();

    match hint.shape {
        ShapeKind::Particles => {
            let particle_mesh = meshes.add(Sphere::new(PARTICLE_RADIUS).mesh().uv(16, 16));
            let particle_material = materials.add(StandardMaterial {
                base_color: colour,
                emissive: LinearRgba::from(colour) * 2.0,
                ..default()
            });
            commands.entity(model).with_children(|parent| {
                for offset in particle_offsets(hint.dimensions, PARTICLE_COUNT) {
                    parent.spawn((
                        Mesh3d(particle_mesh.clone()),
                        MeshMaterial3d(particle_material.clone()),
                        Transform::from_translation(offset),
                    ));
                }
            });
        }
        shape => {
            let material = materials.add(StandardMaterial {
                base_color: colour,
                double_sided: shape == ShapeKind::Plane,
                cull_mode: if shape == ShapeKind::Plane {
                    None
                } else {
                    Some(bevy::render::render_resource::Face::Back)
                },
                ..default()
            });
            let mesh = meshes.add(shape_mesh(hint));
            commands
                .entity(model)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn torus_knot_has_expected_topology() {
        let mesh = create_torus_knot_mesh(0.3, 0.1, 64, 16, 2.0, 3.0);
        assert_eq!(mesh.count_vertices(), 65 * 17);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(64 * 16 * 6));

        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("missing normals");
        };
        assert!(normals
            .iter()
            .all(|n| (Vec3::from_array(*n).length() - 1.0).abs() < 1e-3));
    }

    #[test]
    fn particles_stay_inside_dimensions() {
        let dimensions = [1.0, 0.5, 2.0];
        let offsets = particle_offsets(dimensions, PARTICLE_COUNT);
        assert_eq!(offsets.len(), PARTICLE_COUNT);
        let half = Vec3::from_array(dimensions) * 0.5 + Vec3::splat(1e-5);
        assert!(offsets
            .iter()
            .all(|o| o.abs().cmple(half).all()));
    }
}
