//! Event model appended to the session log.
//!
//! # Responsibility
//! - Define the immutable facts derived from commands.
//! - Own the self-describing JSON wire form published to the UI.
//!
//! # Invariants
//! - Every serialized event carries its type tag in the `@type` field.
//! - `NoteAdded` always starts with empty text.

use crate::model::command::NoteId;
use serde::{Deserialize, Serialize};

/// Immutable fact recorded in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Event {
    /// A new empty note exists.
    #[serde(rename = "NoteAddedEvent")]
    NoteAdded {
        id: NoteId,
        text: String,
        /// Human-readable local creation time.
        #[serde(rename = "timeCreated")]
        time_created: String,
    },
    /// The UI should show this note in the editor.
    #[serde(rename = "NoteSelectedEvent")]
    NoteSelected { id: NoteId },
    /// The note is gone from the list.
    #[serde(rename = "NoteDeletedEvent")]
    NoteDeleted { id: NoteId },
    /// The note text was replaced.
    #[serde(rename = "NoteUpdatedEvent")]
    NoteUpdated { id: NoteId, text: String },
}

impl Event {
    /// Builds the creation event for a freshly assigned id.
    pub fn note_added(id: NoteId, time_created: impl Into<String>) -> Self {
        Self::NoteAdded {
            id,
            text: String::new(),
            time_created: time_created.into(),
        }
    }

    /// Returns the note this event refers to.
    pub fn note_id(&self) -> NoteId {
        match self {
            Self::NoteAdded { id, .. }
            | Self::NoteSelected { id }
            | Self::NoteDeleted { id }
            | Self::NoteUpdated { id, .. } => *id,
        }
    }

    /// Returns the `@type` tag used on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NoteAdded { .. } => "NoteAddedEvent",
            Self::NoteSelected { .. } => "NoteSelectedEvent",
            Self::NoteDeleted { .. } => "NoteDeletedEvent",
            Self::NoteUpdated { .. } => "NoteUpdatedEvent",
        }
    }

    /// Serializes this event as one JSON object string.
    pub fn to_wire(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses one JSON object string produced by [`Event::to_wire`].
    pub fn from_wire(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::Event;

    #[test]
    fn type_name_matches_serialized_tag() {
        let events = [
            Event::note_added(1, "now"),
            Event::NoteSelected { id: 1 },
            Event::NoteDeleted { id: 1 },
            Event::NoteUpdated {
                id: 1,
                text: "hi".to_string(),
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["@type"], event.type_name());
            assert_eq!(json["id"], 1);
        }
    }

    #[test]
    fn note_added_uses_camel_case_time_field() {
        let wire = Event::note_added(7, "Oct 17th 2026, 3:04:05 pm")
            .to_wire()
            .unwrap();
        assert_eq!(
            wire,
            r#"{"@type":"NoteAddedEvent","id":7,"text":"","timeCreated":"Oct 17th 2026, 3:04:05 pm"}"#
        );
    }
}
