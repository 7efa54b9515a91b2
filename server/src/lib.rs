//! # Mailroom Server Library
//!
//! Data access and signalling primitives for the Mailroom terminal client.
//! Everything here is used from background tasks; none of it knows about the
//! terminal.
//!
//! ## Modules
//!
//! - [`model`] - Identifiers, mailbox and message summaries
//! - [`store`] - The [`store::MailStore`] trait and an in-memory implementation
//! - [`bus`] - Account keyed wait/publish signal for "mailbox changed" events
//! - [`delivery`] - Inbound mail path (store, then publish)
//! - [`taskpool`] - Bounded, cancellable spawner for background operations
//! - [`common`] - Shared error types

pub mod bus;
pub mod common;
pub mod delivery;
pub mod model;
pub mod store;
pub mod taskpool;
