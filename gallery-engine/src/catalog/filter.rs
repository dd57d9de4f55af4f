use serde::{Deserialize, Serialize};

use super::artwork::{ArtworkRecord, Category};
use super::favorites::FavoriteSet;
use super::ArtworkCatalog;

/// Listing selected by the home view's `type` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "category")]
pub enum CatalogFilter {
    All,
    Featured,
    Category(Category),
    Favorites,
}

impl CatalogFilter {
    /// Parse a query value; missing or unrecognised values select `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::All;
        };
        match value.to_lowercase().as_str() {
            "featured" => Self::Featured,
            "favorites" => Self::Favorites,
            other => Category::from_string(other).map_or(Self::All, Self::Category),
        }
    }

    pub fn as_query(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Featured => "featured",
            Self::Category(category) => category.as_str(),
            Self::Favorites => "favorites",
        }
    }

    pub fn apply<'a>(
        &self,
        catalog: &'a ArtworkCatalog,
        favorites: &FavoriteSet,
    ) -> Vec<&'a ArtworkRecord> {
        match self {
            Self::All => catalog.list_all(),
            Self::Featured => catalog.list_featured(),
            Self::Category(category) => catalog.list_by_category(*category),
            Self::Favorites => catalog.list_favorites(favorites),
        }
    }
}

/// Narrow a listing to artworks whose title, artist or description contains
/// `query`, ignoring case. A blank query returns the listing unchanged.
pub fn search<'a>(listing: Vec<&'a ArtworkRecord>, query: &str) -> Vec<&'a ArtworkRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return listing;
    }
    listing
        .into_iter()
        .filter(|artwork| artwork.matches_lowercase(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_values() {
        assert_eq!(CatalogFilter::from_query(None), CatalogFilter::All);
        assert_eq!(CatalogFilter::from_query(Some("featured")), CatalogFilter::Featured);
        assert_eq!(
            CatalogFilter::from_query(Some("painting")),
            CatalogFilter::Category(Category::Painting)
        );
        assert_eq!(CatalogFilter::from_query(Some("favorites")), CatalogFilter::Favorites);
        assert_eq!(CatalogFilter::from_query(Some("nonsense")), CatalogFilter::All);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = ArtworkCatalog::default();

        let by_title = search(catalog.list_all(), "NEBULA");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "3");

        let by_artist = search(catalog.list_all(), "gonzález");
        assert_eq!(by_artist.len(), 1);
        assert_eq!(by_artist[0].id, "2");

        let by_description = search(catalog.list_all(), "information age");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, "6");
    }

    #[test]
    fn blank_search_keeps_listing() {
        let catalog = ArtworkCatalog::default();
        assert_eq!(search(catalog.list_all(), "   ").len(), catalog.len());
    }

    #[test]
    fn search_composes_with_filter() {
        let catalog = ArtworkCatalog::default();
        let favorites = FavoriteSet::default();
        let listing = CatalogFilter::Category(Category::Sculpture).apply(&catalog, &favorites);
        let found = search(listing, "structure");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");
    }
}
