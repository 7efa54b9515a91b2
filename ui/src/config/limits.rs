/// Smallest number of background operations allowed to run at once.
/// The notification wait holds one permit for the whole session.
pub const MIN_TASK_POOL_SIZE: usize = 2;

/// Largest number of background operations allowed to run at once
pub const MAX_TASK_POOL_SIZE: usize = 64;

/// Upper bound for the demo traffic generator (messages per minute)
pub const MAX_TRAFFIC_PER_MINUTE: u32 = 600;

/// Upper bound for the artificial store latency (10 seconds)
pub const MAX_STORE_LATENCY_MS: u64 = 10_000;

/// Accepted values for `[logging] level`
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
