//! Command model received from the UI intake channel.
//!
//! # Responsibility
//! - Represent every user intent the adapter understands as one sum type.
//! - Own the canonical wire tags used by the tagged flat-array encoding.
//!
//! # Invariants
//! - A `Command` value has already passed boundary validation.
//! - `AddNote` carries no id; identity is assigned by the session.

/// Session-scoped note identity. Assigned from 1 upwards, never reused.
pub type NoteId = u64;

/// Wire tag for [`Command::AddNote`].
pub const ADD_NOTE_TAG: &str = "AddNoteCommand";
/// Wire tag for [`Command::DeleteNote`].
pub const DELETE_NOTE_TAG: &str = "DeleteNoteCommand";
/// Wire tag for [`Command::SelectNote`].
pub const SELECT_NOTE_TAG: &str = "SelectNoteCommand";
/// Wire tag for [`Command::UpdateNote`].
pub const UPDATE_NOTE_TAG: &str = "UpdateNoteCommand";
/// Wire tag for [`Command::PrintDecodedEvents`].
pub const PRINT_DECODED_EVENTS_TAG: &str = "PrintDecodedEvents";

/// User intent emitted by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty note and select it.
    AddNote,
    /// Remove a note from the list.
    DeleteNote { id: NoteId },
    /// Move editor focus to a note.
    SelectNote { id: NoteId },
    /// Replace the full text of a note.
    UpdateNote { id: NoteId, text: String },
    /// Diagnostic echo of the event names the UI just decoded.
    ///
    /// `event_names` is a comma-separated list in decode order.
    PrintDecodedEvents { event_names: String },
}

impl Command {
    /// Returns the wire tag of this command.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AddNote => ADD_NOTE_TAG,
            Self::DeleteNote { .. } => DELETE_NOTE_TAG,
            Self::SelectNote { .. } => SELECT_NOTE_TAG,
            Self::UpdateNote { .. } => UPDATE_NOTE_TAG,
            Self::PrintDecodedEvents { .. } => PRINT_DECODED_EVENTS_TAG,
        }
    }

    /// Returns whether the command appends to the event log.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::PrintDecodedEvents { .. })
    }

    /// Returns whether `tag` names one of the known commands.
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(
            tag,
            ADD_NOTE_TAG
                | DELETE_NOTE_TAG
                | SELECT_NOTE_TAG
                | UPDATE_NOTE_TAG
                | PRINT_DECODED_EVENTS_TAG
        )
    }
}

/// Returns the final entry of a comma-separated event-name list.
///
/// The entry is returned verbatim, whitespace included. An empty list yields
/// an empty name.
pub fn last_event_name(event_names: &str) -> &str {
    event_names.rsplit(',').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{last_event_name, Command};

    #[test]
    fn last_event_name_takes_trailing_entry() {
        assert_eq!(
            last_event_name("NoteAddedEvent,NoteSelectedEvent"),
            "NoteSelectedEvent"
        );
        assert_eq!(last_event_name("NoteAddedEvent"), "NoteAddedEvent");
        assert_eq!(last_event_name("a, b "), " b ");
        assert_eq!(last_event_name(""), "");
    }

    #[test]
    fn only_print_decoded_events_is_non_mutating() {
        assert!(Command::AddNote.is_mutating());
        assert!(Command::DeleteNote { id: 1 }.is_mutating());
        assert!(!Command::PrintDecodedEvents {
            event_names: String::new()
        }
        .is_mutating());
    }

    #[test]
    fn tags_round_trip_through_known_tag_check() {
        let commands = [
            Command::AddNote,
            Command::SelectNote { id: 3 },
            Command::UpdateNote {
                id: 3,
                text: "x".to_string(),
            },
        ];
        for command in commands {
            assert!(Command::is_known_tag(command.tag()));
        }
        assert!(!Command::is_known_tag("AddNote"));
    }
}
