use std::collections::BTreeSet;

use bevy::prelude::*;

/// Favorite artwork ids for the current session. Never persisted.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    /// Add the id if absent, remove it if present. Returns whether the id is
    /// a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = FavoriteSet::default();
        assert!(favorites.toggle("2"));
        assert!(favorites.contains("2"));
        assert!(!favorites.toggle("2"));
        assert!(favorites.is_empty());
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(
            initial in proptest::collection::btree_set("[a-z0-9]{1,4}", 0..8),
            id in "[a-z0-9]{1,4}",
        ) {
            let mut favorites = FavoriteSet::default();
            for existing in &initial {
                favorites.toggle(existing);
            }
            let before = favorites.clone();
            favorites.toggle(&id);
            favorites.toggle(&id);
            prop_assert_eq!(favorites, before);
        }
    }
}
