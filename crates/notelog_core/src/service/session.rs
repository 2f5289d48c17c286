//! Command translator session.
//!
//! # Responsibility
//! - Own the event log and note id counter of one UI session.
//! - Translate each command into events, append them and publish the log.
//! - Hand deferred UI work back to the caller instead of performing it.
//!
//! # Invariants
//! - Commands are handled one at a time, to completion, in arrival order.
//! - Note ids start at 1, grow by exactly one per `AddNote`, never repeat.
//! - Publish is invoked iff the current command appended at least one event.
//! - Ids in delete/select/update commands are not checked for existence.

use crate::clock::{format_time_created, Clock, SystemClock};
use crate::config::{ConfigError, SessionConfig};
use crate::model::command::{last_event_name, Command, NoteId};
use crate::model::event::Event;
use crate::port::intake::{decode_command, DecodeError};
use crate::port::publish::Publisher;
use crate::projection::notes::NoteProjection;
use crate::store::event_log::EventLog;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

/// Identifier of one translator session, used in diagnostics and by the UI
/// bridge as a handle.
pub type SessionId = Uuid;

/// Session-level failure.
#[derive(Debug)]
pub enum SessionError {
    /// Session config did not validate.
    Config(ConfigError),
    /// Raw command tokens did not decode.
    Decode(DecodeError),
    /// Event could not be serialized for publication.
    Encode(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid session config: {err}"),
            Self::Decode(err) => write!(f, "command rejected: {err}"),
            Self::Encode(err) => write!(f, "event encoding failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DecodeError> for SessionError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// UI work requested by the session, to be performed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Focus the note editor after `delay`.
    FocusNoteEditor { delay: Duration },
}

/// Result of handling one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Events appended by this command, in order.
    pub events: Vec<Event>,
    /// Whether the log was published for this command.
    pub published: bool,
    /// UI work the caller should schedule.
    pub deferred: Vec<DeferredAction>,
}

impl DispatchOutcome {
    /// Returns the requested editor focus delay, if any.
    pub fn focus_delay(&self) -> Option<Duration> {
        self.deferred.iter().find_map(|action| match action {
            DeferredAction::FocusNoteEditor { delay } => Some(*delay),
        })
    }
}

/// Events and side requests derived from one command, not yet committed.
struct Translation {
    events: Vec<Event>,
    deferred: Vec<DeferredAction>,
    /// Counter value to commit once `events` are in the log.
    assigned_note_id: Option<NoteId>,
}

impl Translation {
    fn events(events: Vec<Event>) -> Self {
        Self {
            events,
            deferred: Vec::new(),
            assigned_note_id: None,
        }
    }
}

/// Translator session: command in, events appended, log published.
pub struct NoteSession<P: Publisher> {
    id: SessionId,
    config: SessionConfig,
    clock: Box<dyn Clock + Send>,
    publisher: P,
    log: EventLog,
    last_note_id: NoteId,
}

impl<P: Publisher> NoteSession<P> {
    /// Starts a session on the system clock.
    ///
    /// # Errors
    /// - Returns `SessionError::Config` when `config` does not validate.
    pub fn new(config: SessionConfig, publisher: P) -> Result<Self, SessionError> {
        Self::with_clock(config, SystemClock, publisher)
    }

    /// Starts a session on a caller-provided clock.
    pub fn with_clock(
        config: SessionConfig,
        clock: impl Clock + Send + 'static,
        publisher: P,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let id = Uuid::new_v4();
        info!(
            "event=session_open module=session status=ok session={} focus_delay_ms={}",
            id,
            config.focus_delay().as_millis()
        );
        Ok(Self {
            id,
            config,
            clock: Box::new(clock),
            publisher,
            log: EventLog::new(),
            last_note_id: 0,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Decodes raw tagged-array tokens and dispatches the command.
    ///
    /// # Errors
    /// - Returns `SessionError::Decode` for malformed or unknown commands;
    ///   nothing is appended or published in that case.
    pub fn dispatch_raw<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
    ) -> Result<DispatchOutcome, SessionError> {
        let command = decode_command(tokens).map_err(|err| {
            // Decode errors can echo raw field values; keep only metadata.
            warn!(
                "event=command_decode module=session status=rejected session={} reason={} tokens={}",
                self.id,
                err.kind(),
                tokens.len()
            );
            err
        })?;
        self.dispatch(command)
    }

    /// Handles one typed command to completion.
    ///
    /// # Errors
    /// - Returns `SessionError::Encode` when an event cannot be serialized;
    ///   the log and id counter are left unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<DispatchOutcome, SessionError> {
        let tag = command.tag();
        let published = command.is_mutating();
        let Translation {
            events,
            deferred,
            assigned_note_id,
        } = self.translate(command);
        debug_assert_eq!(published, !events.is_empty());

        if let Err(err) = self.log.append_all(events.clone()) {
            warn!(
                "event=log_append module=session status=error session={} command={} err={}",
                self.id, tag, err
            );
            return Err(err.into());
        }
        if let Some(id) = assigned_note_id {
            self.last_note_id = id;
        }

        if published {
            self.publisher.publish(self.log.wire());
        }

        debug!(
            "event=command_dispatch module=session status=ok session={} command={} appended={} log_len={} published={} deferred={}",
            self.id,
            tag,
            events.len(),
            self.log.len(),
            published,
            deferred.len()
        );

        Ok(DispatchOutcome {
            events,
            published,
            deferred,
        })
    }

    fn translate(&self, command: Command) -> Translation {
        match command {
            Command::AddNote => {
                let id = self.last_note_id + 1;
                let time_created = format_time_created(&self.clock.now());
                Translation {
                    events: vec![
                        Event::note_added(id, time_created),
                        Event::NoteSelected { id },
                    ],
                    deferred: Vec::new(),
                    assigned_note_id: Some(id),
                }
            }
            Command::DeleteNote { id } => Translation::events(vec![Event::NoteDeleted { id }]),
            Command::SelectNote { id } => Translation::events(vec![Event::NoteSelected { id }]),
            Command::UpdateNote { id, text } => {
                Translation::events(vec![Event::NoteUpdated { id, text }])
            }
            Command::PrintDecodedEvents { event_names } => {
                let deferred = if last_event_name(&event_names) == self.config.focus_trigger_event()
                {
                    vec![DeferredAction::FocusNoteEditor {
                        delay: self.config.focus_delay(),
                    }]
                } else {
                    Vec::new()
                };
                Translation {
                    events: Vec::new(),
                    deferred,
                    assigned_note_id: None,
                }
            }
        }
    }

    /// Returns the full event history in append order.
    pub fn events(&self) -> &[Event] {
        self.log.as_slice()
    }

    /// Returns the serialized log exactly as last published.
    pub fn published_log(&self) -> &[String] {
        self.log.wire()
    }

    /// Returns the most recently assigned note id, `0` before any `AddNote`.
    pub fn last_note_id(&self) -> NoteId {
        self.last_note_id
    }

    /// Materializes the note list by replaying the log.
    pub fn projection(&self) -> NoteProjection {
        NoteProjection::replay(self.log.iter())
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }
}
