//! Core command → event adapter for the notes UI.
//! This crate is the single source of truth for session invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod port;
pub mod projection;
pub mod service;
pub mod store;

pub use clock::{format_time_created, Clock, FixedClock, SystemClock};
pub use config::{
    normalize_focus_delay_ms, ConfigError, SessionConfig, DEFAULT_FOCUS_DELAY_MS,
    MAX_FOCUS_DELAY_MS,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::command::{Command, NoteId};
pub use model::event::Event;
pub use model::note::Note;
pub use port::intake::{decode_command, DecodeError};
pub use port::publish::{Publisher, RecordingPublisher};
pub use projection::notes::{derive_preview_text, NoteProjection};
pub use service::session::{
    DeferredAction, DispatchOutcome, NoteSession, SessionError, SessionId,
};
pub use store::event_log::EventLog;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
