//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note sessions to Dart via FRB as plain, stable envelopes.
//! - Own the handle → session registry so the core stays free of globals.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - A session handle is valid from `session_open` until `session_close`.
//! - Each dispatch returns the full published log, or none when nothing was
//!   appended.

use log::{info, warn};
use notelog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    normalize_focus_delay_ms, ping as ping_inner, NoteSession, RecordingPublisher, SessionConfig,
    SessionId,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use uuid::Uuid;

type BridgeSession = NoteSession<RecordingPublisher>;

static SESSIONS: OnceLock<Mutex<HashMap<SessionId, BridgeSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Response envelope for opening a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOpenResponse {
    /// Whether a session was created.
    pub ok: bool,
    /// Session handle in string form; empty on failure.
    pub session_id: String,
    /// Effective focus delay applied to this session.
    pub focus_delay_ms: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Response envelope for one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    /// Whether the command was accepted.
    pub ok: bool,
    /// Full serialized event log; `None` when the command appended nothing.
    pub published: Option<Vec<String>>,
    /// Delay after which the UI should focus the note editor, if requested.
    pub focus_delay_ms: Option<u32>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl DispatchResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            published: None,
            focus_delay_ms: None,
            message: message.into(),
        }
    }
}

/// Opens a fresh note session with an empty log.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - `focus_delay_ms`: `None`/`0` uses the default; large values are clamped.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(focus_delay_ms: Option<u32>) -> SessionOpenResponse {
    let applied_delay_ms = normalize_focus_delay_ms(focus_delay_ms);
    let config = SessionConfig::default()
        .with_focus_delay(Duration::from_millis(u64::from(applied_delay_ms)));
    let session = match NoteSession::new(config, RecordingPublisher::new()) {
        Ok(session) => session,
        Err(err) => {
            return SessionOpenResponse {
                ok: false,
                session_id: String::new(),
                focus_delay_ms: applied_delay_ms,
                message: format!("session_open failed: {err}"),
            };
        }
    };

    let session_id = session.id();
    sessions().insert(session_id, session);
    info!("event=ffi_session_open module=ffi status=ok session={session_id}");
    SessionOpenResponse {
        ok: true,
        session_id: session_id.to_string(),
        focus_delay_ms: applied_delay_ms,
        message: "Session opened.".to_string(),
    }
}

/// Dispatches one tagged flat-array command to a session.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Unknown handles, unknown commands and malformed fields return `ok=false`
///   without touching the log.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_dispatch(session_id: String, tokens: Vec<String>) -> DispatchResponse {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(message) => return DispatchResponse::failure(message),
    };

    let mut sessions = sessions();
    let Some(session) = sessions.get_mut(&id) else {
        return DispatchResponse::failure(format!("unknown session `{session_id}`"));
    };

    match session.dispatch_raw(tokens.as_slice()) {
        Ok(outcome) => {
            let published = session.publisher_mut().take_latest();
            let focus_delay_ms = outcome
                .focus_delay()
                .map(|delay| u32::try_from(delay.as_millis()).unwrap_or(u32::MAX));
            let message = match (&published, focus_delay_ms) {
                (Some(log), _) => format!("Published {} event(s).", log.len()),
                (None, Some(_)) => "Editor focus requested.".to_string(),
                (None, None) => "No changes.".to_string(),
            };
            DispatchResponse {
                ok: true,
                published,
                focus_delay_ms,
                message,
            }
        }
        Err(err) => DispatchResponse::failure(format!("session_dispatch failed: {err}")),
    }
}

/// Returns the current serialized log of a session.
///
/// # FFI contract
/// - Sync call; returns an empty list for unknown handles.
#[flutter_rust_bridge::frb(sync)]
pub fn session_events(session_id: String) -> Vec<String> {
    let Ok(id) = parse_session_id(&session_id) else {
        return Vec::new();
    };
    sessions()
        .get(&id)
        .map(|session| session.published_log().to_vec())
        .unwrap_or_default()
}

/// Closes a session and drops its log.
///
/// Returns `true` when a session was closed.
#[flutter_rust_bridge::frb(sync)]
pub fn session_close(session_id: String) -> bool {
    let Ok(id) = parse_session_id(&session_id) else {
        return false;
    };
    let closed = sessions().remove(&id).is_some();
    if closed {
        info!("event=ffi_session_close module=ffi status=ok session={id}");
    }
    closed
}

fn parse_session_id(raw: &str) -> Result<SessionId, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| {
        warn!("event=ffi_session_lookup module=ffi status=rejected reason=invalid_handle");
        format!("invalid session id `{raw}`: {err}")
    })
}

fn sessions() -> MutexGuard<'static, HashMap<SessionId, BridgeSession>> {
    let registry = SESSIONS.get_or_init(|| Mutex::new(HashMap::new()));
    // A poisoned registry still holds consistent sessions: every dispatch
    // completes its append before returning.
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, session_close, session_dispatch, session_events,
        session_open,
    };

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn session_open_normalizes_focus_delay() {
        let opened = session_open(Some(0));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.focus_delay_ms, 50);

        let clamped = session_open(Some(60_000));
        assert_eq!(clamped.focus_delay_ms, 1_000);

        assert!(session_close(opened.session_id));
        assert!(session_close(clamped.session_id));
    }

    #[test]
    fn dispatch_returns_full_log_after_each_mutation() {
        let opened = session_open(None);
        let id = opened.session_id;

        let added = session_dispatch(id.clone(), tokens(&["AddNoteCommand"]));
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.published.as_ref().map(Vec::len), Some(2));

        let updated = session_dispatch(
            id.clone(),
            tokens(&["UpdateNoteCommand", "id:number", "1", "text", "hi"]),
        );
        let log = updated.published.expect("update should publish");
        assert_eq!(log.len(), 3);
        assert_eq!(log[2], r#"{"@type":"NoteUpdatedEvent","id":1,"text":"hi"}"#);
        assert_eq!(session_events(id.clone()), log);

        assert!(session_close(id.clone()));
        assert!(!session_close(id));
    }

    #[test]
    fn dispatch_reports_focus_request_without_publish() {
        let opened = session_open(Some(75));
        let response = session_dispatch(
            opened.session_id.clone(),
            tokens(&[
                "PrintDecodedEvents",
                "eventNames",
                "NoteAddedEvent,NoteSelectedEvent",
            ]),
        );
        assert!(response.ok);
        assert_eq!(response.published, None);
        assert_eq!(response.focus_delay_ms, Some(75));
        session_close(opened.session_id);
    }

    #[test]
    fn dispatch_rejects_bad_handles_and_commands() {
        let unknown = session_dispatch(
            "11111111-2222-4333-8444-555555555555".to_string(),
            tokens(&["AddNoteCommand"]),
        );
        assert!(!unknown.ok);
        assert!(unknown.message.contains("unknown session"));

        let malformed = session_dispatch("not-a-uuid".to_string(), tokens(&["AddNoteCommand"]));
        assert!(!malformed.ok);

        let opened = session_open(None);
        let rejected = session_dispatch(opened.session_id.clone(), tokens(&["NopCommand"]));
        assert!(!rejected.ok);
        assert!(rejected.message.contains("unknown command"));
        assert!(session_events(opened.session_id.clone()).is_empty());
        session_close(opened.session_id);
    }
}
