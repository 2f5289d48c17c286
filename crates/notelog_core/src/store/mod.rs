//! Session-scoped, in-memory event storage.

pub mod event_log;
