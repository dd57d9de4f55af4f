/// Reticle ring inner radius in metres.
pub const RETICLE_INNER_RADIUS: f32 = 0.1;

/// Reticle ring outer radius in metres.
pub const RETICLE_OUTER_RADIUS: f32 = 0.15;

/// Reticle colour as linear-ish sRGB components with alpha.
pub const RETICLE_COLOUR: [f32; 4] = [0.204, 0.596, 0.859, 0.8];

/// Vertical offset of the title label below a placed artwork.
pub const TITLE_LABEL_OFFSET: f32 = -0.6;

/// Vertical offset of the artist label below a placed artwork.
pub const ARTIST_LABEL_OFFSET: f32 = -0.75;

pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const ARTIST_FONT_SIZE: f32 = 12.0;

/// Number of spheres in a particle cluster.
pub const PARTICLE_COUNT: usize = 50;

/// Radius of each particle sphere.
pub const PARTICLE_RADIUS: f32 = 0.02;

/// Torus knot main radius, tube radius, tubular and radial segments.
pub const KNOT_RADIUS: f32 = 0.3;
pub const KNOT_TUBE_RADIUS: f32 = 0.1;
pub const KNOT_TUBULAR_SEGMENTS: usize = 64;
pub const KNOT_RADIAL_SEGMENTS: usize = 16;

/// Spin rates in radians per second for the animated render hints.
pub const ROTATE_ANIMATION_SPEED: f32 = 0.5;
pub const FLOW_ANIMATION_SPEED: f32 = 0.2;

/// Vertical bob amplitude of the flow animation, in metres.
pub const FLOW_BOB_AMPLITUDE: f32 = 0.1;

/// Turntable speed of the static preview, radians per second.
pub const PREVIEW_TURNTABLE_SPEED: f32 = 0.4;
