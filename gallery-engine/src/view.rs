//! AR view state: the artwork queued for placement and the controls that shape
//! the next placement.

use bevy::prelude::*;

use crate::catalog::{ArtworkCatalog, ArtworkRecord};
use crate::error::{GalleryError, Result};
use crate::notify::{Notification, Notifications};
use crate::transform::TransformControls;

#[derive(Resource, Debug, Default)]
pub struct ArViewState {
    selected: Option<String>,
    controls: TransformControls,
}

impl ArViewState {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected<'a>(&self, catalog: &'a ArtworkCatalog) -> Option<&'a ArtworkRecord> {
        self.selected
            .as_deref()
            .and_then(|id| catalog.get_by_id(id))
    }

    pub fn controls(&self) -> &TransformControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut TransformControls {
        &mut self.controls
    }

    /// Queue an artwork for placement. Unknown ids leave the selection as it
    /// was.
    pub fn select<'a>(
        &mut self,
        id: &str,
        catalog: &'a ArtworkCatalog,
        notifications: &mut Notifications,
    ) -> Result<&'a ArtworkRecord> {
        let Some(artwork) = catalog.get_by_id(id) else {
            warn!("Cannot select unknown artwork {}", id);
            notifications.push(Notification::destructive(
                "Artwork not found",
                "The requested artwork is not in the gallery.",
            ));
            return Err(GalleryError::NotFoundInCatalog(id.to_string()));
        };

        info!("Selected artwork {} ({})", artwork.id, artwork.title);
        self.selected = Some(artwork.id.clone());
        notifications.push(Notification::info(
            "Artwork selected",
            format!("\"{}\" is ready to be placed in AR.", artwork.title),
        ));
        Ok(artwork)
    }

    /// Clear the selection and the controls. Objects already placed in the
    /// session are left alone.
    pub fn reset(&mut self, notifications: &mut Notifications) {
        self.selected = None;
        self.controls.reset();
        notifications.push(Notification::info(
            "View reset",
            "Selection and controls were restored to their defaults.",
        ));
    }

    pub fn to_json(&self, catalog: &ArtworkCatalog) -> serde_json::Value {
        serde_json::json!({
            "selected": self.selected(catalog),
            "scale": self.controls.scale(),
            "rotation": self.controls.rotation_degrees(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_known_artwork_notifies() {
        let catalog = ArtworkCatalog::default();
        let mut notifications = Notifications::default();
        let mut view = ArViewState::default();

        let artwork = view.select("2", &catalog, &mut notifications).unwrap();
        assert_eq!(artwork.title, "Abstraction in Blue");
        assert_eq!(view.selected_id(), Some("2"));
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn unknown_artwork_keeps_previous_selection() {
        let catalog = ArtworkCatalog::default();
        let mut notifications = Notifications::default();
        let mut view = ArViewState::default();
        view.select("1", &catalog, &mut notifications).unwrap();

        let result = view.select("99", &catalog, &mut notifications);
        assert_eq!(result, Err(GalleryError::NotFoundInCatalog("99".to_string())));
        assert_eq!(view.selected_id(), Some("1"));
    }

    #[test]
    fn reset_clears_selection_and_controls() {
        let catalog = ArtworkCatalog::default();
        let mut notifications = Notifications::default();
        let mut view = ArViewState::default();
        view.select("1", &catalog, &mut notifications).unwrap();
        view.controls_mut().zoom_in();
        view.controls_mut().rotate();

        view.reset(&mut notifications);
        assert!(view.selected_id().is_none());
        assert_eq!(view.controls().scale(), 1.0);
        assert_eq!(view.controls().rotation_degrees(), 0.0);
    }
}
