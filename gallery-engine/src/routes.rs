//! Deep-link resolution for the host page's router.
//!
//! ```text
//! /                  Home (all artworks)
//! /?type=<filter>    Home (featured | sculpture | painting | digital | favorites)
//! /artwork/<id>      Artwork detail
//! /ar                AR view, nothing selected
//! /ar?id=<id>        AR view with <id> preselected
//! anything else      Not found
//! ```

use bevy::prelude::*;
use serde::Serialize;

use crate::catalog::{ArtworkCatalog, CatalogFilter};
use crate::error::GalleryError;
use crate::notify::{Notification, Notifications};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Home { filter: CatalogFilter },
    ArtworkDetail { id: String },
    ArView { artwork_id: Option<String> },
    NotFound { path: String },
}

impl Route {
    /// Parse a path with an optional query string. Does not consult the
    /// catalog.
    pub fn parse(path: &str) -> Self {
        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let trimmed = path_part.trim_end_matches('/');

        match trimmed {
            "" => Route::Home {
                filter: CatalogFilter::from_query(query_value(query, "type")),
            },
            "/ar" => Route::ArView {
                artwork_id: query_value(query, "id")
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
            },
            other => match other.strip_prefix("/artwork/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::ArtworkDetail {
                    id: id.to_string(),
                },
                _ => Route::NotFound {
                    path: path.to_string(),
                },
            },
        }
    }

    /// Artwork id the route refers to, if any.
    pub fn artwork_id(&self) -> Option<&str> {
        match self {
            Route::ArtworkDetail { id } => Some(id),
            Route::ArView { artwork_id } => artwork_id.as_deref(),
            _ => None,
        }
    }

    pub fn home() -> Self {
        Route::Home {
            filter: CatalogFilter::All,
        }
    }
}

fn query_value<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Outcome of resolving a path against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResolution {
    pub route: Route,
    /// Set when the requested route was replaced by another one.
    pub redirected_from: Option<String>,
}

/// Resolve a path. An artwork id that is not in the catalog redirects to the
/// home view and queues a not-found notification.
pub fn resolve(
    path: &str,
    catalog: &ArtworkCatalog,
    notifications: &mut Notifications,
) -> RouteResolution {
    let route = Route::parse(path);

    if let Some(id) = route.artwork_id() {
        if !catalog.contains(id) {
            let error = GalleryError::NotFoundInCatalog(id.to_string());
            warn!("Redirecting {} to home: {}", path, error);
            notifications.push(Notification::destructive(
                "Artwork not found",
                "The artwork you are looking for does not exist or has been removed.",
            ));
            return RouteResolution {
                route: Route::home(),
                redirected_from: Some(path.to_string()),
            };
        }
    }

    debug!("Resolved route {} -> {:?}", path, route);
    RouteResolution {
        route,
        redirected_from: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::home());
        assert_eq!(
            Route::parse("/?type=digital"),
            Route::Home {
                filter: CatalogFilter::Category(Category::Digital)
            }
        );
        assert_eq!(
            Route::parse("/artwork/4"),
            Route::ArtworkDetail { id: "4".to_string() }
        );
        assert_eq!(Route::parse("/ar"), Route::ArView { artwork_id: None });
        assert_eq!(
            Route::parse("/ar?id=5"),
            Route::ArView {
                artwork_id: Some("5".to_string())
            }
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert!(matches!(Route::parse("/gallery"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/artwork/"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/artwork/1/edit"), Route::NotFound { .. }));
    }

    #[test]
    fn unknown_filter_falls_back_to_all() {
        assert_eq!(Route::parse("/?type=sculptures"), Route::home());
    }

    #[test]
    fn missing_artwork_redirects_home_with_notification() {
        let catalog = ArtworkCatalog::default();
        let mut notifications = Notifications::default();

        let resolution = resolve("/artwork/999", &catalog, &mut notifications);
        assert_eq!(resolution.route, Route::home());
        assert_eq!(resolution.redirected_from.as_deref(), Some("/artwork/999"));
        assert_eq!(notifications.len(), 1);

        let resolution = resolve("/ar?id=999", &catalog, &mut notifications);
        assert_eq!(resolution.route, Route::home());
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn known_artwork_resolves_without_notification() {
        let catalog = ArtworkCatalog::default();
        let mut notifications = Notifications::default();
        let resolution = resolve("/ar?id=3", &catalog, &mut notifications);
        assert_eq!(resolution.route.artwork_id(), Some("3"));
        assert!(resolution.redirected_from.is_none());
        assert!(notifications.is_empty());
    }
}
