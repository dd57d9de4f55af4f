//! Frame systems that connect gallery state to Bevy.

/// Optional configuration and catalog files.
pub mod asset_loading;

/// Mouse and keyboard stand-ins for the immersive session (native builds).
#[cfg(not(target_arch = "wasm32"))]
pub mod desktop_simulation;

/// Capability probe scheduling and result application.
pub mod support_check;
