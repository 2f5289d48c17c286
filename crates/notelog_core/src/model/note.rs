//! Note read model.
//!
//! Materialized from the event log by `projection::notes`; never mutated by
//! command handling directly.

use crate::model::command::NoteId;
use serde::Serialize;

/// Current state of one note as seen by list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Raw text as last written by the editor.
    pub text: String,
    pub time_created: String,
    /// Plain-text summary derived from `text`; `None` for blank notes.
    pub preview_text: Option<String>,
}

impl Note {
    /// Creates an empty note as recorded by a creation event.
    pub fn new(id: NoteId, time_created: impl Into<String>) -> Self {
        Self {
            id,
            text: String::new(),
            time_created: time_created.into(),
            preview_text: None,
        }
    }

    /// Returns whether the note has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
