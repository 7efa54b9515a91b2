use super::{
    LoggingConfig, demo::DemoConfig, keys::KeyBindingsConfig, limits::*, ui::UIConfig,
    validation::ConfigValidationError,
};
use crate::theme;
use serde::Deserialize;
use server::model::AccountId;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    account_id: Option<i64>,
    crossterm_input_listener_interval_ms: Option<u64>,
    crossterm_input_listener_retries: Option<usize>,
    poll_timeout_ms: Option<u64>,
    tick_interval_millis: Option<u64>,
    task_pool_size: Option<usize>,

    #[serde(default)]
    keys: KeyBindingsConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    ui: UIConfig,
    #[serde(default)]
    demo: DemoConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(configured) = self.account_id {
            if configured <= 0 {
                errors.push(ConfigValidationError::AccountId { configured });
            }
        }

        let pool = self.task_pool_size();
        if !(MIN_TASK_POOL_SIZE..=MAX_TASK_POOL_SIZE).contains(&pool) {
            errors.push(ConfigValidationError::TaskPoolSize {
                configured: pool,
                min_limit: MIN_TASK_POOL_SIZE,
                max_limit: MAX_TASK_POOL_SIZE,
            });
        }

        let (min, max) = (
            self.demo.traffic_min_per_minute(),
            self.demo.traffic_max_per_minute(),
        );
        if min > max {
            errors.push(ConfigValidationError::TrafficRange { min, max });
        }
        if max > MAX_TRAFFIC_PER_MINUTE {
            errors.push(ConfigValidationError::TrafficRate {
                configured: max,
                limit: MAX_TRAFFIC_PER_MINUTE,
            });
        }

        if self.demo.store_latency_ms() > MAX_STORE_LATENCY_MS {
            errors.push(ConfigValidationError::StoreLatency {
                configured: self.demo.store_latency_ms(),
                limit: MAX_STORE_LATENCY_MS,
            });
        }

        let bindings = self.keys.bindings();
        for (i, (first, key)) in bindings.iter().enumerate() {
            if let Some((second, _)) = bindings[i + 1..].iter().find(|(_, other)| other == key) {
                errors.push(ConfigValidationError::DuplicateKey {
                    key: *key,
                    first: *first,
                    second: *second,
                });
            }
        }

        for (field, value) in [
            ("muted_color", self.ui.muted_color()),
            ("accent_color", self.ui.accent_color()),
        ] {
            if theme::parse_color(value).is_none() {
                errors.push(ConfigValidationError::Color {
                    field,
                    value: value.to_string(),
                });
            }
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                value: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // App-specific configuration accessors
    pub fn account_id(&self) -> AccountId {
        AccountId(self.account_id.unwrap_or(1))
    }

    pub fn crossterm_input_listener_interval(&self) -> Duration {
        Duration::from_millis(self.crossterm_input_listener_interval_ms.unwrap_or(10))
    }

    pub fn crossterm_input_listener_retries(&self) -> usize {
        self.crossterm_input_listener_retries.unwrap_or(10)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms.unwrap_or(50))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_millis.unwrap_or(250))
    }

    pub fn task_pool_size(&self) -> usize {
        self.task_pool_size.unwrap_or(8)
    }

    // Configuration section accessors
    pub fn keys(&self) -> &KeyBindingsConfig {
        &self.keys
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn ui(&self) -> &UIConfig {
        &self.ui
    }

    pub fn demo(&self) -> &DemoConfig {
        &self.demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("valid test config")
    }

    #[test]
    fn empty_config_uses_defaults_and_validates() {
        let config = parse("");
        assert_ok!(config.validate());
        assert_eq!(config.account_id(), AccountId(1));
        assert_eq!(config.task_pool_size(), 8);
        assert_eq!(config.keys().quit(), 'q');
        assert_eq!(config.ui().title(), "Mailroom");
        assert!(!config.demo().traffic_enabled());
    }

    #[test]
    fn sections_are_read() {
        let config = parse(
            r##"
            account_id = 4
            task_pool_size = 4

            [keys]
            key_quit = "x"

            [logging]
            level = "debug"

            [ui]
            accent_color = "#ff00aa"

            [demo]
            traffic_enabled = true
            store_latency_ms = 200
            "##,
        );
        assert_ok!(config.validate());
        assert_eq!(config.account_id(), AccountId(4));
        assert_eq!(config.keys().quit(), 'x');
        assert_eq!(config.logging().level(), "debug");
        assert_eq!(config.demo().store_latency(), Duration::from_millis(200));
        assert!(config.demo().traffic_enabled());
    }

    #[test]
    fn duplicate_bindings_are_rejected() {
        let config = parse(
            r#"
            [keys]
            key_create_mailbox = "j"
            "#,
        );
        let errors = assert_err!(config.validate());
        assert_eq!(
            errors,
            vec![ConfigValidationError::DuplicateKey {
                key: 'j',
                first: "key_down",
                second: "key_create_mailbox",
            }]
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let config = parse(
            r#"
            account_id = 0
            task_pool_size = 1

            [logging]
            level = "chatty"

            [ui]
            muted_color = "not-a-color"

            [demo]
            traffic_min_per_minute = 20
            traffic_max_per_minute = 10
            store_latency_ms = 60000
            "#,
        );
        let errors = assert_err!(config.validate());
        assert_eq!(errors.len(), 6);
        assert!(errors.iter().all(|e| !e.user_message().is_empty()));
    }
}
