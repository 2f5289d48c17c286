//! Note list projection.
//!
//! # Responsibility
//! - Materialize the current note list and selection from events.
//! - Derive plain-text previews from markdown note text.
//!
//! # Invariants
//! - Notes keep creation order.
//! - Events referencing ids that are not currently listed are ignored here;
//!   the log still records them.
//! - Deleting the selected note clears the selection.

use crate::model::command::NoteId;
use crate::model::event::Event;
use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Current note list and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteProjection {
    notes: Vec<Note>,
    selected: Option<NoteId>,
}

impl NoteProjection {
    /// Rebuilds the projection from a full event history.
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut projection = Self::default();
        for event in events {
            projection.apply(event);
        }
        projection
    }

    /// Folds one event into the projection.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::NoteAdded {
                id,
                text,
                time_created,
            } => {
                let mut note = Note::new(*id, time_created.clone());
                note.preview_text = derive_preview_text(text);
                note.text = text.clone();
                self.notes.push(note);
            }
            Event::NoteSelected { id } => {
                if self.contains(*id) {
                    self.selected = Some(*id);
                }
            }
            Event::NoteDeleted { id } => {
                self.notes.retain(|note| note.id != *id);
                if self.selected == Some(*id) {
                    self.selected = None;
                }
            }
            Event::NoteUpdated { id, text } => {
                if let Some(note) = self.notes.iter_mut().find(|note| note.id == *id) {
                    note.text = text.clone();
                    note.preview_text = derive_preview_text(text);
                }
            }
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }
}

/// Derives a plain-text preview from markdown note text.
///
/// Rules:
/// - images are dropped, links keep their label
/// - markdown symbols removed, whitespace collapsed
/// - first 100 chars retained; blank text yields `None`
pub fn derive_preview_text(text: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(text, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_preview_text, NoteProjection};
    use crate::model::event::Event;

    #[test]
    fn preview_strips_markdown_and_limits_length() {
        let preview = derive_preview_text("# title\n\n- [link](https://example.com) ![x](a.png)")
            .expect("preview should exist");
        assert_eq!(preview, "title link");

        let long = "a".repeat(300);
        assert_eq!(derive_preview_text(&long).map(|p| p.len()), Some(100));
        assert_eq!(derive_preview_text("  **  "), None);
    }

    #[test]
    fn replay_applies_updates_in_place_and_filters_deletes() {
        let events = vec![
            Event::note_added(1, "t1"),
            Event::NoteSelected { id: 1 },
            Event::note_added(2, "t2"),
            Event::NoteSelected { id: 2 },
            Event::NoteUpdated {
                id: 1,
                text: "**first**".to_string(),
            },
            Event::NoteDeleted { id: 2 },
        ];
        let projection = NoteProjection::replay(&events);

        assert_eq!(projection.notes().len(), 1);
        let first = projection.get(1).expect("note 1 should remain");
        assert_eq!(first.text, "**first**");
        assert_eq!(first.preview_text.as_deref(), Some("first"));
        assert_eq!(first.time_created, "t1");
        assert!(!projection.contains(2));
        assert_eq!(projection.selected(), None);
    }

    #[test]
    fn unknown_ids_do_not_change_projection() {
        let events = vec![
            Event::note_added(1, "t1"),
            Event::NoteSelected { id: 1 },
            Event::NoteSelected { id: 42 },
            Event::NoteUpdated {
                id: 42,
                text: "ghost".to_string(),
            },
            Event::NoteDeleted { id: 99 },
        ];
        let projection = NoteProjection::replay(&events);
        assert_eq!(projection.notes().len(), 1);
        assert_eq!(projection.selected(), Some(1));
        assert!(projection.get(1).unwrap().is_blank());
    }
}
