use serde::{Deserialize, Serialize};

/// Closed set of artwork categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sculpture,
    Painting,
    #[serde(alias = "digital-art")]
    Digital,
}

impl Category {
    /// Convert a query or route value into a category.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sculpture" => Some(Self::Sculpture),
            "painting" => Some(Self::Painting),
            "digital" | "digital-art" => Some(Self::Digital),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sculpture => "sculpture",
            Self::Painting => "painting",
            Self::Digital => "digital",
        }
    }
}

/// Primitive the renderer draws for an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(alias = "cube")]
    Box,
    Sphere,
    Plane,
    Particles,
    #[serde(alias = "custom")]
    Knot,
}

/// Idle animation applied to a rendered artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    /// Continuous spin about the vertical axis.
    Rotate,
    /// Slow spin plus a vertical bob.
    Flow,
}

/// Per-artwork metadata selecting how the renderer draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderHint {
    pub shape: ShapeKind,
    /// `#rrggbb`
    pub colour: String,
    /// Extents along x, y, z. Spheres use the first component as radius.
    #[serde(default = "unit_dimensions")]
    pub dimensions: [f32; 3],
    #[serde(default)]
    pub animation: Option<AnimationMode>,
    /// Texture style for planes (`abstract`, `landscape`), informational only.
    #[serde(default)]
    pub texture: Option<String>,
}

fn unit_dimensions() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl RenderHint {
    /// Parse `colour` into sRGB components, `None` when malformed.
    pub fn colour_rgb(&self) -> Option<[f32; 3]> {
        parse_hex_colour(&self.colour)
    }
}

/// Parse `#rrggbb` (leading `#` optional) into 0..1 sRGB components.
pub fn parse_hex_colour(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn default_scale_hint() -> f32 {
    1.0
}

/// A catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub featured: bool,
    pub render_hint: RenderHint,
    /// Default spatial scale the renderer multiplies into the model.
    #[serde(default = "default_scale_hint")]
    pub scale_hint: f32,
}

impl ArtworkRecord {
    /// Text offered to the platform share sheet or clipboard.
    pub fn share_text(&self) -> String {
        format!(
            "Look at \"{}\" by {} in AR Art Gallery",
            self.title, self.artist
        )
    }

    /// Case-insensitive substring match on title, artist or description.
    /// `query` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.artist.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_accepts_aliases() {
        assert_eq!(Category::from_string("Digital"), Some(Category::Digital));
        assert_eq!(Category::from_string("digital-art"), Some(Category::Digital));
        assert_eq!(Category::from_string("photography"), None);

        let parsed: Category = serde_json::from_str("\"digital-art\"").unwrap();
        assert_eq!(parsed, Category::Digital);
    }

    #[test]
    fn shape_kind_accepts_legacy_names() {
        let cube: ShapeKind = serde_json::from_str("\"cube\"").unwrap();
        let custom: ShapeKind = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(cube, ShapeKind::Box);
        assert_eq!(custom, ShapeKind::Knot);
    }

    #[test]
    fn hex_colours() {
        assert_eq!(parse_hex_colour("#ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_colour("000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_colour("#fff"), None);
        assert_eq!(parse_hex_colour("#gg0000"), None);
    }
}
