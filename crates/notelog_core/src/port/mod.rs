//! UI boundary: command intake decoding and log publication.
//!
//! # Responsibility
//! - Turn raw tagged flat arrays into typed `Command` values, once.
//! - Define the outbound seam the session publishes its log through.
//!
//! # Invariants
//! - Nothing past this module sees untyped command tokens.
//! - Decode failures are reported, never coerced into default values.

pub mod intake;
pub mod publish;
