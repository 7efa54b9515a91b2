use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Invalid task_pool_size: {configured} (min: {min_limit}, max: {max_limit})")]
    TaskPoolSize {
        configured: usize,
        min_limit: usize,
        max_limit: usize,
    },
    #[error("Invalid account_id: {configured}")]
    AccountId { configured: i64 },
    #[error("Invalid traffic rate: min {min} is greater than max {max}")]
    TrafficRange { min: u32, max: u32 },
    #[error("Invalid traffic_max_per_minute: {configured} (limit: {limit})")]
    TrafficRate { configured: u32, limit: u32 },
    #[error("Invalid store_latency_ms: {configured} (limit: {limit})")]
    StoreLatency { configured: u64, limit: u64 },
    #[error("Duplicate key binding '{key}' for {first} and {second}")]
    DuplicateKey {
        key: char,
        first: &'static str,
        second: &'static str,
    },
    #[error("Invalid color for {field}: {value}")]
    Color { field: &'static str, value: String },
    #[error("Invalid log level: {value}")]
    LogLevel { value: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::TaskPoolSize {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Task pool size out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update task_pool_size in config.toml."
                )
            }
            ConfigValidationError::AccountId { configured } => {
                format!(
                    "Account id must be positive!\n\n\
                    Your configured value: {configured}\n\n\
                    Please update account_id in config.toml or pass --account."
                )
            }
            ConfigValidationError::TrafficRange { min, max } => {
                format!(
                    "Demo traffic range is inverted!\n\n\
                    traffic_min_per_minute: {min}\n\
                    traffic_max_per_minute: {max}\n\n\
                    Please make the minimum lower than or equal to the maximum in [demo]."
                )
            }
            ConfigValidationError::TrafficRate { configured, limit } => {
                format!(
                    "Demo traffic rate too high!\n\n\
                    Your configured value: {configured} per minute\n\
                    Maximum: {limit} per minute\n\n\
                    Please update traffic_max_per_minute in [demo]."
                )
            }
            ConfigValidationError::StoreLatency { configured, limit } => {
                format!(
                    "Store latency too high!\n\n\
                    Your configured value: {configured} ms\n\
                    Maximum: {limit} ms\n\n\
                    Please update store_latency_ms in [demo]."
                )
            }
            ConfigValidationError::DuplicateKey { key, first, second } => {
                format!(
                    "Key '{key}' is bound twice!\n\n\
                    It is used by both {first} and {second}.\n\n\
                    Please pick a different key for one of them in [keys]."
                )
            }
            ConfigValidationError::Color { field, value } => {
                format!(
                    "Unknown color '{value}'!\n\n\
                    Use a color name, a #rrggbb value or a 256-color index.\n\n\
                    Please update {field} in [ui]."
                )
            }
            ConfigValidationError::LogLevel { value } => {
                format!(
                    "Unknown log level '{value}'!\n\n\
                    Use one of: off, error, warn, info, debug, trace.\n\n\
                    Please update level in [logging]."
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
