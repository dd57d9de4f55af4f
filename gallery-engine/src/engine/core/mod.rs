//! Core application setup and state management.
//!
//! Builds the app for native and WASM targets, wires the gallery resources
//! and plugins, and follows the support verdict between the interactive and
//! static-preview states.

/// Application setup and plugin configuration.
pub mod app_setup;

/// Support-driven application state machine.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
