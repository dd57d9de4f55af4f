//! Scene entities mirroring the gallery resources.
//!
//! Placed artworks, their labels and the reticle follow the placement
//! session; the turntable follows the selection while AR is unavailable.
//! Systems here only read domain state and never change it.

/// Idle animations for artwork models.
pub mod animation;

/// Title and artist labels projected under placed artworks.
pub mod labels;

/// Mesh construction for each render hint.
pub mod models;

/// Entities for committed placements.
pub mod placed;

/// Static turntable preview.
pub mod preview;

/// Surface reticle.
pub mod reticle;
