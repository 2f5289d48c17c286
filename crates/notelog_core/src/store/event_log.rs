//! Append-only event log.
//!
//! # Responsibility
//! - Keep the ordered history of events of one session.
//! - Keep the wire form of every event alongside it, so publishing the full
//!   log does not re-serialize history.
//!
//! # Invariants
//! - Events are never removed, reordered or edited.
//! - `events` and `wire` always have equal length and matching order.
//! - A batch is appended entirely or not at all.

use crate::model::event::Event;

/// Ordered, append-only history of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
    wire: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one command's events in order.
    ///
    /// Returns the number of events appended.
    ///
    /// # Errors
    /// - Returns the serialization error of the first event that fails to
    ///   encode; the log is left unchanged in that case.
    pub fn append_all(&mut self, batch: Vec<Event>) -> serde_json::Result<usize> {
        let encoded = batch
            .iter()
            .map(Event::to_wire)
            .collect::<serde_json::Result<Vec<_>>>()?;
        let appended = batch.len();
        self.events.extend(batch);
        self.wire.extend(encoded);
        Ok(appended)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Returns the published form: one JSON object string per event.
    pub fn wire(&self) -> &[String] {
        &self.wire
    }
}
