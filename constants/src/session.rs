/// Immersive session mode requested from the platform.
pub const IMMERSIVE_AR_MODE: &str = "immersive-ar";

/// Features the platform must grant for a placement session.
pub const REQUIRED_FEATURES: &[&str] = &["hit-test"];

/// Features requested when available.
pub const OPTIONAL_FEATURES: &[&str] = &["dom-overlay"];

/// Facing mode requested for the capability probe's camera stream.
pub const PROBE_FACING_MODE: &str = "environment";

/// Reason reported when no immersive AR runtime answers the capability query.
pub const REASON_RUNTIME_ABSENT: &str = "AR runtime absent";

/// Reason reported when neither motion nor orientation sensors exist.
pub const REASON_SENSORS_ABSENT: &str = "sensors absent";

/// Message used when a session fault carries no recognised error code.
pub const UNKNOWN_SESSION_ERROR: &str = "unknown session error";
