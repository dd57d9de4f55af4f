use super::artwork::{AnimationMode, ArtworkRecord, Category, RenderHint, ShapeKind};

#[allow(clippy::too_many_arguments)]
fn artwork(
    id: &str,
    title: &str,
    artist: &str,
    year: i32,
    description: &str,
    category: Category,
    featured: bool,
    render_hint: RenderHint,
) -> ArtworkRecord {
    ArtworkRecord {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        year,
        description: description.to_string(),
        category,
        featured,
        render_hint,
        scale_hint: 1.0,
    }
}

fn hint(
    shape: ShapeKind,
    colour: &str,
    dimensions: [f32; 3],
    animation: Option<AnimationMode>,
    texture: Option<&str>,
) -> RenderHint {
    RenderHint {
        shape,
        colour: colour.to_string(),
        dimensions,
        animation,
        texture: texture.map(str::to_string),
    }
}

/// The gallery's default six artworks.
pub fn builtin_artworks() -> Vec<ArtworkRecord> {
    vec![
        artwork(
            "1",
            "Modern Sculpture",
            "Carlos Rodríguez",
            2022,
            "A contemporary sculpture exploring geometric forms and negative space.",
            Category::Sculpture,
            true,
            hint(ShapeKind::Box, "#3498db", [1.0, 1.0, 1.0], None, None),
        ),
        artwork(
            "2",
            "Abstraction in Blue",
            "María González",
            2021,
            "An abstract painting that uses shades of blue to evoke calm and depth.",
            Category::Painting,
            true,
            hint(
                ShapeKind::Plane,
                "#ffffff",
                [1.5, 1.5, 0.01],
                None,
                Some("abstract"),
            ),
        ),
        artwork(
            "3",
            "Digital Nebula",
            "Alex Torres",
            2023,
            "Digital art depicting a space nebula with vibrant colours and organic shapes.",
            Category::Digital,
            false,
            hint(
                ShapeKind::Sphere,
                "#9b59b6",
                [0.8, 0.8, 0.8],
                Some(AnimationMode::Rotate),
                None,
            ),
        ),
        artwork(
            "4",
            "Impossible Structure",
            "Javier Méndez",
            2020,
            "A sculpture that defies perception with forms that seem to break the laws of physics.",
            Category::Sculpture,
            false,
            hint(ShapeKind::Knot, "#e74c3c", [1.0, 1.0, 1.0], None, None),
        ),
        artwork(
            "5",
            "Dreamscape",
            "Laura Sánchez",
            2019,
            "A surreal landscape blending natural elements with dreamlike visions.",
            Category::Painting,
            true,
            hint(
                ShapeKind::Plane,
                "#ffffff",
                [1.8, 1.2, 0.01],
                None,
                Some("landscape"),
            ),
        ),
        artwork(
            "6",
            "Data Flow",
            "Daniel Ortiz",
            2023,
            "An artistic visualisation of data streams representing the information age.",
            Category::Digital,
            false,
            hint(
                ShapeKind::Particles,
                "#2ecc71",
                [1.0, 1.0, 1.0],
                Some(AnimationMode::Flow),
                None,
            ),
        ),
    ]
}
