//! Read models derived by replaying the event log.
//!
//! # Responsibility
//! - Fold events into list-view state without touching the log.
//!
//! # Invariants
//! - Projections are rebuildable from the log alone at any time.

pub mod notes;
