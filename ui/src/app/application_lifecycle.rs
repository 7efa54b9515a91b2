//! Application lifecycle management
//!
//! This module handles the initialization, main loop, and shutdown of the application.

use crate::app::model::Model;
use crate::components::common::Msg;
use crate::config::{self, AppConfig, ConfigOverrides, ConfigValidationError};
use crate::error::{AppError, ErrorReporter};
use crate::logger;

use log::{debug, error, info};
use server::store::{MailStore, MemoryStore, SeedData};
use std::error::Error as StdError;
use std::sync::Arc;
use tuirealm::Update;
use tuirealm::application::PollStrategy;
use tuirealm::terminal::CrosstermTerminalAdapter;

/// Application initialization and lifecycle management
pub struct ApplicationLifecycle;

impl ApplicationLifecycle {
    /// Initialize the application and return the configured model.
    ///
    /// Must run inside a tokio runtime: the initial load is dispatched before
    /// returning.
    pub fn initialize(
        overrides: &ConfigOverrides,
    ) -> Result<Model<CrosstermTerminalAdapter>, Box<dyn StdError>> {
        let config = Self::load_configuration(overrides)?;

        if let Err(e) = logger::setup_logger(config.logging()) {
            eprintln!("Warning: Failed to initialize logger: {e}");
        }
        info!("Starting Mailroom for account {}", config.account_id());

        Self::validate_configuration(config)?;
        info!("Configuration loaded and validated successfully");

        let store = Self::create_store(config)?;
        let mut model = Self::create_model(config, store)?;
        model.start();

        Ok(model)
    }

    /// Load the application configuration
    fn load_configuration(
        overrides: &ConfigOverrides,
    ) -> Result<&'static AppConfig, Box<dyn StdError>> {
        match config::init_config(overrides) {
            config::ConfigLoadResult::Success(config) => Ok(config.as_ref()),
            config::ConfigLoadResult::LoadError(error) => {
                Self::report_critical_error(
                    AppError::Config(error.to_string()),
                    "ConfigurationLoader",
                    "load_config",
                    "Configuration loading failed. The application cannot start without a valid configuration.",
                );
                Err(error.to_string().into())
            }
            config::ConfigLoadResult::DeserializeError(error) => {
                Self::report_critical_error(
                    AppError::Config(error.to_string()),
                    "ConfigurationParser",
                    "parse_config",
                    "Configuration parsing failed. Please fix your configuration syntax and try again.",
                );
                Err(error.to_string().into())
            }
        }
    }

    fn validate_configuration(config: &AppConfig) -> Result<(), Box<dyn StdError>> {
        if let Err(validation_errors) = config.validate() {
            error!(
                "Configuration validation failed with {} errors",
                validation_errors.len()
            );
            Self::report_validation_errors(&validation_errors);
            return Err("Configuration validation failed".into());
        }
        Ok(())
    }

    fn report_validation_errors(validation_errors: &[ConfigValidationError]) {
        for (i, validation_error) in validation_errors.iter().enumerate() {
            error!("Config validation error {}: {:?}", i + 1, validation_error);
            eprintln!("Configuration error: {}", validation_error.user_message());
        }
    }

    /// Build the store from the seed file, or from the bundled demo data
    fn create_store(config: &AppConfig) -> Result<Arc<dyn MailStore>, Box<dyn StdError>> {
        let seed = match config.demo().seed_file() {
            Some(path) => {
                info!("Seeding store from {path}");
                SeedData::from_file(path)
            }
            None => Ok(SeedData::demo()),
        };

        let store = seed
            .and_then(|seed| MemoryStore::from_seed(config.account_id(), &seed))
            .map_err(|e| {
                Self::report_critical_error(
                    AppError::from(e.clone()),
                    "MailStore",
                    "seed",
                    &format!("Could not load mail data: {e}"),
                );
                e
            })?
            .with_latency(config.demo().store_latency());

        Ok(Arc::new(store))
    }

    /// Create and initialize the application model
    fn create_model(
        config: &AppConfig,
        store: Arc<dyn MailStore>,
    ) -> Result<Model<CrosstermTerminalAdapter>, Box<dyn StdError>> {
        match Model::new(config, store) {
            Ok(model) => {
                info!("Model initialized successfully");
                Ok(model)
            }
            Err(e) => {
                Self::report_critical_error(
                    e.clone(),
                    "ApplicationModel",
                    "initialize",
                    "Failed to initialize application model. The application cannot start. Please check your configuration and try again.",
                );
                Err(e.into())
            }
        }
    }

    /// Setup terminal for application use
    pub fn setup_terminal(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        debug!("Entering alternate screen");
        model
            .terminal
            .enter_alternate_screen()
            .map_err(|e| format!("Failed to enter alternate screen: {e}"))?;
        model
            .terminal
            .enable_raw_mode()
            .map_err(|e| format!("Failed to enable raw mode: {e}"))?;
        Ok(())
    }

    /// Run the main application loop
    pub fn run_application_loop(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        info!("Entering main application loop");

        while !model.quit {
            Self::process_single_iteration(model)?;
        }

        Ok(())
    }

    /// Process a single iteration of the main loop
    fn process_single_iteration(
        model: &mut Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        model.update_outside_msg();

        // Tick and handle messages
        match model.app.tick(PollStrategy::Once) {
            Err(err) => {
                Self::handle_tick_error(model, err);
            }
            Ok(messages) if !messages.is_empty() => {
                Self::process_messages(model, messages);
            }
            _ => {}
        }

        Self::handle_redraw(model);

        Ok(())
    }

    /// Surface tick errors in the status line
    fn handle_tick_error(model: &mut Model<CrosstermTerminalAdapter>, err: tuirealm::ApplicationError) {
        error!("Application tick error: {err:?}");
        model.error_reporter.report_warning(
            AppError::Component(format!("Application error: {err:?}")),
            "EventLoop",
            "poll_terminal_events",
        );
        model.redraw = true;
    }

    /// Process all received messages
    fn process_messages(model: &mut Model<CrosstermTerminalAdapter>, messages: Vec<Msg>) {
        model.redraw = true;
        for msg in messages.into_iter() {
            let mut msg = Some(msg);
            while msg.is_some() {
                msg = model.update(msg);
            }
        }
    }

    /// Handle view redraw if needed
    fn handle_redraw(model: &mut Model<CrosstermTerminalAdapter>) {
        if model.redraw {
            if let Err(e) = model.view() {
                error!("Error during view rendering: {e}");
                model
                    .error_reporter
                    .report_simple(e, "ViewRendering", "main_loop");
            }
            model.redraw = false;
        }
    }

    /// Properly shutdown the application
    pub fn shutdown_application(
        mut model: Model<CrosstermTerminalAdapter>,
    ) -> Result<(), Box<dyn StdError>> {
        info!("Application shutdown initiated");
        if !model.quit {
            model.shutdown();
        }

        // Terminate terminal
        debug!("Leaving alternate screen");
        let _ = model.terminal.leave_alternate_screen();
        let _ = model.terminal.disable_raw_mode();
        let _ = model.terminal.clear_screen();

        info!("Application terminated successfully");
        Ok(())
    }

    /// Report critical error and prepare for application exit
    fn report_critical_error(
        error: AppError,
        component: &str,
        operation: &str,
        user_message: &str,
    ) {
        // Create a temporary ErrorReporter for critical initialization errors
        let (tx, _rx) = std::sync::mpsc::channel();
        let error_reporter = ErrorReporter::new(tx);

        error_reporter.report_critical_and_exit(error, component, operation, user_message);

        // Also ensure the error is visible in case ErrorReporter fails
        eprintln!("Critical Error: {user_message}");
    }
}
