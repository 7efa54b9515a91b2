use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod app;
pub mod demo;
pub mod keys;
pub mod limits;
pub mod ui;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "MAILROOM";

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

/// Values given on the command line. They win over the file and the
/// environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub account_id: Option<i64>,
    pub seed_file: Option<PathBuf>,
}

/// Where to look for `config.toml` when no path is given: the working
/// directory first, then the platform config directory.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("mailroom").join(CONFIG_FILE_NAME))
}

fn file_source(path: Option<&Path>) -> Option<File<config::FileSourceFile, config::FileFormat>> {
    match path {
        // An explicitly requested file has to exist.
        Some(path) => Some(File::from(path).required(true)),
        None => default_config_path().map(|path| File::from(path).required(false)),
    }
}

fn build_config(overrides: &ConfigOverrides) -> Result<Config, config::ConfigError> {
    let mut builder = Config::builder();
    if let Some(file) = file_source(overrides.config_path.as_deref()) {
        builder = builder.add_source(file);
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    if let Some(account_id) = overrides.account_id {
        builder = builder.set_override("account_id", account_id)?;
    }
    if let Some(seed_file) = &overrides.seed_file {
        builder = builder.set_override("demo.seed_file", seed_file.display().to_string())?;
    }

    builder.build()
}

/// Loads the configuration without touching the global.
pub fn load_config(overrides: &ConfigOverrides) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let config = match build_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Loads the configuration once for the whole process. Later calls return the
/// first result regardless of `overrides`.
pub fn init_config(overrides: &ConfigOverrides) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config(overrides))
}

/// Logging configuration (`[logging]`)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
