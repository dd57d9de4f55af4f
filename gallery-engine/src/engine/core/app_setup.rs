use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::capability::SupportStatus;
use crate::catalog::{ArtworkCatalog, CatalogManifest, FavoriteSet};
use crate::config::GalleryConfig;
use crate::engine::core::app_state::{AppState, transition_on_support_verdict};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::{
    animation::animate_artwork_models,
    labels::update_artwork_labels,
    placed::{clear_placed_artworks, sync_placed_artworks},
    preview::{clear_preview, spin_turntable, sync_preview_model},
    reticle::{hide_reticle, refresh_reticle_mesh, spawn_reticle, update_reticle},
};
use crate::engine::systems::asset_loading::{
    CatalogLoader, ConfigLoader, load_catalog_system, load_config_system, start_loading,
};
use crate::engine::systems::support_check::{
    ProbeResults, SupportCheckRequested, apply_support_results, request_initial_support_check,
    start_support_checks,
};
use crate::notify::{Notification, Notifications};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::session::PlacementSessionController;
use crate::view::ArViewState;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::desktop_simulation::{
    handle_gallery_keyboard_shortcuts, simulate_hit_test, simulate_select, simulation_enabled,
};

const WELCOME_DURATION_MS: u32 = 5000;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Optional JSON overrides for configuration and the catalog.
        .add_plugins(JsonAssetPlugin::<GalleryConfig>::new(&["config.json"]))
        .add_plugins(JsonAssetPlugin::<CatalogManifest>::new(&["catalog.json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<GalleryConfig>()
        .init_resource::<ArtworkCatalog>()
        .init_resource::<FavoriteSet>()
        .init_resource::<SupportStatus>()
        .init_resource::<ArViewState>()
        .init_resource::<PlacementSessionController>()
        .init_resource::<Notifications>()
        .init_resource::<ProbeResults>()
        .init_resource::<ConfigLoader>()
        .init_resource::<CatalogLoader>()
        .add_event::<SupportCheckRequested>();

    app.add_systems(Startup, (setup, start_loading, spawn_reticle).chain())
        .add_systems(
            Update,
            (
                load_config_system,
                load_catalog_system,
                request_initial_support_check,
                start_support_checks,
                apply_support_results,
                transition_on_support_verdict,
            )
                .chain(),
        );

    // Native stand-ins for the host's session callbacks.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (
                handle_gallery_keyboard_shortcuts,
                simulate_hit_test,
                simulate_select,
            )
                .chain()
                .before(sync_placed_artworks)
                .run_if(simulation_enabled),
        );
    }

    app.add_systems(
        Update,
        (
            refresh_reticle_mesh,
            update_reticle,
            sync_placed_artworks,
            update_artwork_labels,
        )
            .chain()
            .run_if(in_state(AppState::Interactive)),
    )
    .add_systems(
        Update,
        (sync_preview_model, spin_turntable)
            .chain()
            .run_if(in_state(AppState::StaticPreview)),
    )
    .add_systems(
        OnExit(AppState::Interactive),
        (clear_placed_artworks, hide_reticle),
    )
    .add_systems(OnExit(AppState::StaticPreview), clear_preview)
    .add_systems(Update, animate_artwork_models);

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

/// Eye-height camera looking into the room. Transparent clear colour so the
/// host's camera feed shows through on the web.
fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Transform::from_xyz(0.0, 1.6, 2.5).looking_at(Vec3::new(0.0, 0.5, -1.0), Vec3::Y),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, mut notifications: ResMut<Notifications>) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);

    notifications.push(
        Notification::info(
            "Welcome to AR Art Gallery!",
            "Browse the collection and place artworks in your space.",
        )
        .with_duration(WELCOME_DURATION_MS),
    );
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
