use serde::Deserialize;
use std::time::Duration;

/// Demo store and traffic configuration (`[demo]`)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct DemoConfig {
    seed_file: Option<String>,
    store_latency_ms: Option<u64>,
    traffic_enabled: Option<bool>,
    traffic_min_per_minute: Option<u32>,
    traffic_max_per_minute: Option<u32>,
}

impl DemoConfig {
    /// JSON seed for the in-memory store; the built-in demo data when unset.
    pub fn seed_file(&self) -> Option<&str> {
        self.seed_file.as_deref()
    }

    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms.unwrap_or(0))
    }

    pub fn store_latency_ms(&self) -> u64 {
        self.store_latency_ms.unwrap_or(0)
    }

    pub fn traffic_enabled(&self) -> bool {
        self.traffic_enabled.unwrap_or(false)
    }

    pub fn traffic_min_per_minute(&self) -> u32 {
        self.traffic_min_per_minute.unwrap_or(2)
    }

    pub fn traffic_max_per_minute(&self) -> u32 {
        self.traffic_max_per_minute.unwrap_or(6)
    }
}
