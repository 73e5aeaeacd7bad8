use fancynotes_core::{truncate_body, Note, TRUNCATED_BODY_MAX_CHARS, TRUNCATION_SUFFIX};

#[test]
fn long_body_keeps_prefix_and_ends_with_suffix() {
    let body = "lorem ipsum dolor sit amet, ".repeat(40);
    let note = Note::new("long", body.clone(), 0);

    let truncated = note.truncated_body();
    let prefix: String = body.chars().take(TRUNCATED_BODY_MAX_CHARS).collect();
    assert!(truncated.starts_with(&prefix));
    assert!(truncated.ends_with(TRUNCATION_SUFFIX));
    assert!(truncated.chars().count() < body.chars().count());
}

#[test]
fn truncated_body_matches_free_function() {
    let note = Note::new("t", format!("{}tail end", "x".repeat(600)), 1);
    assert_eq!(note.truncated_body(), truncate_body(&note.body));
}

#[test]
fn equals_ignore_id_holds_for_any_id_combination() {
    let base = Note::new("groceries", "milk, eggs", 2);
    for (left, right) in [(None, None), (None, Some(1)), (Some(1), Some(1)), (Some(1), Some(9))] {
        let a = Note { id: left, ..base.clone() };
        let b = Note { id: right, ..base.clone() };
        assert!(a.equals_ignore_id(&b));
        assert_eq!(a == b, left == right);
    }
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let note = Note::with_id(7, "title", "body", 3);
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "title");
    assert_eq!(json["body"], "body");
    assert_eq!(json["position"], 3);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn deserialize_without_id_yields_unpersisted_note() {
    let value = serde_json::json!({ "title": "draft", "body": "", "position": 0 });
    let note: Note = serde_json::from_value(value).unwrap();
    assert_eq!(note.id, None);
    assert!(!note.is_persisted());
}

#[test]
fn deserialize_rejects_missing_title() {
    let value = serde_json::json!({ "id": 1, "body": "b", "position": 0 });
    assert!(serde_json::from_value::<Note>(value).is_err());
}
