/// Scale applied by the transform controls before any user adjustment.
pub const DEFAULT_SCALE: f32 = 1.0;

/// Scale change per zoom step.
pub const ZOOM_STEP: f32 = 0.2;

/// Smallest scale the zoom-out control can reach.
pub const MIN_SCALE: f32 = 0.2;

/// Largest scale the zoom-in control can reach.
pub const MAX_SCALE: f32 = 3.0;

/// Rotation added by a single rotate step, in degrees.
pub const ROTATE_STEP_DEGREES: f32 = 45.0;

/// Full turn in degrees; rotation is kept in `[0, FULL_TURN_DEGREES)`.
pub const FULL_TURN_DEGREES: f32 = 360.0;
