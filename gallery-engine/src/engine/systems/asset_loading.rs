//! Optional JSON configuration and catalog files.
//!
//! Both are requested at startup. A missing or invalid file leaves the
//! built-in defaults in place; either way the loader is marked settled.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::{ArtworkCatalog, CatalogManifest};
use crate::config::{CATALOG_ASSET_PATH, CONFIG_ASSET_PATH, GalleryConfig};
use crate::notify::Notifications;
use crate::session::PlacementSessionController;
use crate::view::ArViewState;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<GalleryConfig>>,
    settled: bool,
}

impl ConfigLoader {
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<CatalogManifest>>,
    settled: bool,
}

pub fn start_loading(
    asset_server: Res<AssetServer>,
    mut config_loader: ResMut<ConfigLoader>,
    mut catalog_loader: ResMut<CatalogLoader>,
) {
    info!("Loading {} and {}", CONFIG_ASSET_PATH, CATALOG_ASSET_PATH);
    config_loader.handle = Some(asset_server.load(CONFIG_ASSET_PATH));
    catalog_loader.handle = Some(asset_server.load(CATALOG_ASSET_PATH));
}

fn load_failed<A: Asset>(asset_server: &AssetServer, handle: &Handle<A>) -> bool {
    matches!(asset_server.get_load_state(handle), Some(LoadState::Failed(_)))
}

/// Apply a loaded configuration to every resource that depends on it.
pub fn apply_config(
    config: &GalleryConfig,
    view: &mut ArViewState,
    session: &mut PlacementSessionController,
    notifications: &mut Notifications,
) {
    view.controls_mut().set_limits(config.transform);
    session.set_options(config.session.clone());
    notifications.set_settings(config.notifications);
}

pub fn load_config_system(
    mut loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<GalleryConfig>>,
    mut commands: Commands,
    mut view: ResMut<ArViewState>,
    mut session: ResMut<PlacementSessionController>,
    mut notifications: ResMut<Notifications>,
) {
    if loader.settled {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(config) = configs.get(&handle) {
        match config.validate() {
            Ok(()) => {
                info!("Loaded {}", CONFIG_ASSET_PATH);
                apply_config(config, &mut view, &mut session, &mut notifications);
                commands.insert_resource(config.clone());
            }
            Err(e) => error!("Ignoring {}: {}", CONFIG_ASSET_PATH, e),
        }
        loader.settled = true;
    } else if load_failed(&asset_server, &handle) {
        info!("No usable {}, using defaults", CONFIG_ASSET_PATH);
        loader.settled = true;
    }
}

pub fn load_catalog_system(
    mut loader: ResMut<CatalogLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<CatalogManifest>>,
    mut catalog: ResMut<ArtworkCatalog>,
) {
    if loader.settled {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(manifest) = manifests.get(&handle) {
        match ArtworkCatalog::from_manifest(manifest.clone()) {
            Ok(loaded) => {
                info!("Loaded {} with {} artworks", CATALOG_ASSET_PATH, loaded.len());
                *catalog = loaded;
            }
            Err(e) => error!("Ignoring {}: {}", CATALOG_ASSET_PATH, e),
        }
        loader.settled = true;
    } else if load_failed(&asset_server, &handle) {
        info!("No usable {}, using built-in catalog", CATALOG_ASSET_PATH);
        loader.settled = true;
    }
}
