//! Session configuration.
//!
//! # Responsibility
//! - Hold the tunables of one translator session with sane defaults.
//! - Normalize raw values arriving from the UI bridge.
//!
//! # Invariants
//! - A validated config always has a non-empty focus trigger name.
//! - Focus delay never exceeds `MAX_FOCUS_DELAY_MS`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Delay before the UI should focus the note editor.
pub const DEFAULT_FOCUS_DELAY_MS: u32 = 50;
/// Upper bound for the focus delay accepted from callers.
pub const MAX_FOCUS_DELAY_MS: u32 = 1_000;
/// Event name that, when last in a decoded batch, requests editor focus.
pub const DEFAULT_FOCUS_TRIGGER_EVENT: &str = "NoteSelectedEvent";

/// Configuration validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Focus trigger event name is blank.
    EmptyFocusTrigger,
    /// Focus delay is above `MAX_FOCUS_DELAY_MS`.
    FocusDelayTooLong(Duration),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFocusTrigger => write!(f, "focus trigger event name cannot be empty"),
            Self::FocusDelayTooLong(delay) => write!(
                f,
                "focus delay {}ms exceeds maximum {MAX_FOCUS_DELAY_MS}ms",
                delay.as_millis()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Tunables for one note session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    focus_delay: Duration,
    focus_trigger_event: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_delay: Duration::from_millis(u64::from(DEFAULT_FOCUS_DELAY_MS)),
            focus_trigger_event: DEFAULT_FOCUS_TRIGGER_EVENT.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    pub fn with_focus_trigger_event(mut self, name: impl Into<String>) -> Self {
        self.focus_trigger_event = name.into();
        self
    }

    pub fn focus_delay(&self) -> Duration {
        self.focus_delay
    }

    pub fn focus_trigger_event(&self) -> &str {
        &self.focus_trigger_event
    }

    /// Checks the config before a session is started with it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.focus_trigger_event.trim().is_empty() {
            return Err(ConfigError::EmptyFocusTrigger);
        }
        if self.focus_delay > Duration::from_millis(u64::from(MAX_FOCUS_DELAY_MS)) {
            return Err(ConfigError::FocusDelayTooLong(self.focus_delay));
        }
        Ok(())
    }
}

/// Normalizes a focus delay supplied across the UI bridge.
///
/// - `None` or `0` -> `DEFAULT_FOCUS_DELAY_MS`
/// - values above `MAX_FOCUS_DELAY_MS` are clamped
pub fn normalize_focus_delay_ms(delay_ms: Option<u32>) -> u32 {
    match delay_ms {
        Some(0) | None => DEFAULT_FOCUS_DELAY_MS,
        Some(value) if value > MAX_FOCUS_DELAY_MS => MAX_FOCUS_DELAY_MS,
        Some(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_focus_delay_ms, ConfigError, SessionConfig};
    use std::time::Duration;

    #[test]
    fn default_config_is_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.focus_delay(), Duration::from_millis(50));
        assert_eq!(config.focus_trigger_event(), "NoteSelectedEvent");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_trigger_and_long_delay() {
        let blank = SessionConfig::default().with_focus_trigger_event("  ");
        assert_eq!(blank.validate(), Err(ConfigError::EmptyFocusTrigger));

        let slow = SessionConfig::default().with_focus_delay(Duration::from_secs(5));
        assert!(matches!(
            slow.validate(),
            Err(ConfigError::FocusDelayTooLong(_))
        ));
    }

    #[test]
    fn normalize_focus_delay_defaults_and_clamps() {
        assert_eq!(normalize_focus_delay_ms(None), 50);
        assert_eq!(normalize_focus_delay_ms(Some(0)), 50);
        assert_eq!(normalize_focus_delay_ms(Some(120)), 120);
        assert_eq!(normalize_focus_delay_ms(Some(9_999)), 1_000);
    }
}
