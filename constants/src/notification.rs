/// Display time for ordinary notifications, in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 3000;

/// Display time for capability and session failures, in milliseconds.
pub const ERROR_DURATION_MS: u32 = 5000;

/// Maximum notifications kept while waiting for the host page to drain them.
pub const MAX_PENDING_NOTIFICATIONS: usize = 32;
