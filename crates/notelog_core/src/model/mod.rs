//! Typed domain model for the command → event adapter.
//!
//! # Responsibility
//! - Define the closed set of UI commands and the events derived from them.
//! - Define the note read model materialized from the event log.
//!
//! # Invariants
//! - Commands are ephemeral; only events are ever stored.
//! - Events are immutable once appended to a session log.

pub mod command;
pub mod event;
pub mod note;
