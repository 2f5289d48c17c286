use notelog_core::{Event, EventLog, NoteProjection};
use serde_json::json;

#[test]
fn published_events_are_self_describing_json_objects() {
    let mut log = EventLog::new();
    log.append_all(vec![
        Event::note_added(3, "Oct 1st 2026, 9:00:00 am"),
        Event::NoteSelected { id: 3 },
        Event::NoteUpdated {
            id: 3,
            text: "line \"quoted\"\nnext".to_string(),
        },
        Event::NoteDeleted { id: 3 },
    ])
    .unwrap();

    let decoded = log
        .wire()
        .iter()
        .map(|raw| serde_json::from_str::<serde_json::Value>(raw).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        decoded,
        vec![
            json!({"@type": "NoteAddedEvent", "id": 3, "text": "", "timeCreated": "Oct 1st 2026, 9:00:00 am"}),
            json!({"@type": "NoteSelectedEvent", "id": 3}),
            json!({"@type": "NoteUpdatedEvent", "id": 3, "text": "line \"quoted\"\nnext"}),
            json!({"@type": "NoteDeletedEvent", "id": 3}),
        ]
    );
}

#[test]
fn projection_can_be_rebuilt_from_published_wire_form() {
    let mut log = EventLog::new();
    log.append_all(vec![
        Event::note_added(1, "t1"),
        Event::NoteSelected { id: 1 },
        Event::NoteUpdated {
            id: 1,
            text: "See [docs](https://example.com)".to_string(),
        },
    ])
    .unwrap();

    let events = log
        .wire()
        .iter()
        .map(|raw| Event::from_wire(raw))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(events, log.as_slice());

    let projection = NoteProjection::replay(&events);
    let note = projection.get(1).unwrap();
    assert_eq!(note.preview_text.as_deref(), Some("See docs"));
    let view = serde_json::to_value(note).unwrap();
    assert_eq!(view["timeCreated"], "t1");
    assert_eq!(view["previewText"], "See docs");
}

#[test]
fn unknown_event_tag_fails_to_decode() {
    assert!(Event::from_wire(r#"{"@type":"NoteArchivedEvent","id":1}"#).is_err());
}
