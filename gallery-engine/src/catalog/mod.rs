//! In-memory artwork catalog and session favorites.
//!
//! The catalog is built once (from the built-in list or a JSON catalog file)
//! and never mutated afterwards. Lookups that miss return `None` or an empty
//! listing; nothing here fails at query time.

/// Artwork records, categories and render hints.
pub mod artwork;

/// Built-in artwork list used when no catalog file is supplied.
pub mod builtin;

/// Listing filters and text search.
pub mod filter;

/// Session-scoped favorite ids.
pub mod favorites;

use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub use artwork::{AnimationMode, ArtworkRecord, Category, RenderHint, ShapeKind};
pub use favorites::FavoriteSet;
pub use filter::{CatalogFilter, search};

/// JSON catalog file, loadable as an asset.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub artworks: Vec<ArtworkRecord>,
}

/// Read-only list of artworks, owned by the app and lent to views by reference.
#[derive(Resource, Debug, Clone)]
pub struct ArtworkCatalog {
    artworks: Vec<ArtworkRecord>,
}

impl Default for ArtworkCatalog {
    fn default() -> Self {
        Self {
            artworks: builtin::builtin_artworks(),
        }
    }
}

impl ArtworkCatalog {
    /// Build a catalog, rejecting duplicate or empty ids.
    pub fn new(artworks: Vec<ArtworkRecord>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for artwork in &artworks {
            if artwork.id.trim().is_empty() {
                return Err(ConfigError::InvalidCatalog(format!(
                    "artwork \"{}\" has an empty id",
                    artwork.title
                )));
            }
            if !seen.insert(artwork.id.as_str()) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "duplicate artwork id {}",
                    artwork.id
                )));
            }
        }
        Ok(Self { artworks })
    }

    pub fn from_manifest(manifest: CatalogManifest) -> Result<Self, ConfigError> {
        Self::new(manifest.artworks)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let manifest: CatalogManifest = serde_json::from_str(json)?;
        Self::from_manifest(manifest)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ArtworkRecord> {
        self.artworks.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    pub fn list_all(&self) -> Vec<&ArtworkRecord> {
        self.artworks.iter().collect()
    }

    pub fn list_by_category(&self, category: Category) -> Vec<&ArtworkRecord> {
        self.artworks
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    pub fn list_featured(&self) -> Vec<&ArtworkRecord> {
        self.artworks.iter().filter(|a| a.featured).collect()
    }

    /// Favorites in catalog order. Ids with no catalog entry are skipped.
    pub fn list_favorites(&self, favorites: &FavoriteSet) -> Vec<&ArtworkRecord> {
        self.artworks
            .iter()
            .filter(|a| favorites.contains(&a.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&ArtworkRecord]) -> Vec<String> {
        list.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn lookup_by_id() {
        let catalog = ArtworkCatalog::default();
        assert_eq!(catalog.get_by_id("3").map(|a| a.category), Some(Category::Digital));
        assert!(catalog.get_by_id("missing").is_none());
    }

    #[test]
    fn list_by_category_returns_only_that_category() {
        let catalog = ArtworkCatalog::default();
        let digital = catalog.list_by_category(Category::Digital);
        assert_eq!(ids(&digital), vec!["3", "6"]);
        assert!(digital.iter().all(|a| a.category == Category::Digital));
    }

    #[test]
    fn featured_listing() {
        let catalog = ArtworkCatalog::default();
        assert_eq!(ids(&catalog.list_featured()), vec!["1", "2", "5"]);
    }

    #[test]
    fn favorites_follow_catalog_order() {
        let catalog = ArtworkCatalog::default();
        let mut favorites = FavoriteSet::default();
        favorites.toggle("5");
        favorites.toggle("1");
        favorites.toggle("ghost");
        assert_eq!(ids(&catalog.list_favorites(&favorites)), vec!["1", "5"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut artworks = builtin::builtin_artworks();
        artworks.push(artworks[0].clone());
        assert!(matches!(
            ArtworkCatalog::new(artworks),
            Err(ConfigError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn catalog_from_json() {
        let json = r##"{
            "artworks": [{
                "id": "a",
                "title": "Blue Cube",
                "artist": "Someone",
                "year": 2024,
                "description": "A cube.",
                "category": "sculpture",
                "render_hint": { "shape": "cube", "colour": "#0000ff" }
            }]
        }"##;
        let catalog = ArtworkCatalog::from_json_str(json).unwrap();
        let artwork = catalog.get_by_id("a").unwrap();
        assert_eq!(artwork.render_hint.shape, ShapeKind::Box);
        assert_eq!(artwork.render_hint.dimensions, [1.0, 1.0, 1.0]);
        assert_eq!(artwork.scale_hint, 1.0);
        assert!(!artwork.featured);
    }
}
