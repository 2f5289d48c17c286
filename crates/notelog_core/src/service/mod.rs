//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate decoding, translation, storage and publication.
//! - Keep the UI bridge decoupled from log and codec details.

pub mod session;
