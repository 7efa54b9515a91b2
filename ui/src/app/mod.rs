//! # Application Module
//!
//! Core application logic for the Mailroom terminal client.
//!
//! ## Architecture
//!
//! The application follows a model-view-update architecture:
//! - **Model** - terminal, event loop plumbing and background workers
//! - **Controller** - all UI state, driven by messages, producing tickets
//! - **View** - rendering of the controller state
//!
//! Background work never touches UI state. Every store call runs on the task
//! pool and comes back as a [`requests::Completion`] over the model's channel.
//!
//! ## Usage
//!
//! ```no_run
//! use mailroom::app::application_lifecycle::ApplicationLifecycle;
//! use mailroom::config::ConfigOverrides;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut model = ApplicationLifecycle::initialize(&ConfigOverrides::default())?;
//!     ApplicationLifecycle::setup_terminal(&mut model)?;
//!     ApplicationLifecycle::run_application_loop(&mut model)?;
//!     ApplicationLifecycle::shutdown_application(model)?;
//!     Ok(())
//! }
//! ```

/// Application lifecycle management - startup, shutdown, and main loop
pub mod application_lifecycle;
/// UI state machine
pub mod controller;
/// Notification wait used by the listener task
pub mod listener;
/// Terminal model and event loop plumbing
pub mod model;
/// Tickets and completions exchanged with background tasks
pub mod requests;
/// Home and message screens
pub mod screens;
/// Background task management and coordination
pub mod task_manager;
/// Demo mail generator
pub mod traffic;
/// UI rendering and view composition
pub mod view;
