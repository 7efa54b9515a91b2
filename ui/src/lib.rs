//! # Mailroom UI Library
//!
//! Terminal mailbox browser with live new-mail notifications, built on
//! tui-realm. Mailboxes and messages come from a [`server::store::MailStore`];
//! the screen refreshes itself whenever the store reports a change.
//!
//! ## Modules
//!
//! - [`app`] - Controller, screens, background tasks and the event loop
//! - [`components`] - Picker, key map and tui-realm components
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and centralized error reporting
//! - [`logger`] - Logging configuration
//! - [`theme`] - Colors used by the view
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod app;

pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod theme;

// Re-export commonly used types for easier access in tests
pub use error::AppError;

// Re-export the Msg type that tests commonly need
pub use components::common::Msg;
