//! Shared compile-time settings for the gallery engine.

pub mod category;
pub mod notification;
pub mod render_settings;
pub mod session;
pub mod transform;
