use fancynotes_core::db::open_db_in_memory;
use fancynotes_core::{
    Note, NoteRepository, NoteService, NoteServiceError, RepoError, SqliteNoteRepository,
};

#[test]
fn insert_assigns_id_and_preserves_content() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let original = Note::new("title", "body", 0);

    let id = repo.insert_note(&original).unwrap();
    let stored = repo.get_note(id).unwrap().expect("inserted note should exist");

    assert_eq!(stored.id, Some(id));
    assert!(stored.equals_ignore_id(&original));
    assert_ne!(stored, original);
}

#[test]
fn insert_with_explicit_id_uses_that_id() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();

    let id = repo
        .insert_note(&Note::with_id(41, "fixed", "id", 0))
        .unwrap();
    assert_eq!(id, 41);
    let next = repo.insert_note(&Note::new("auto", "id", 1)).unwrap();
    assert!(next > 41);
}

#[test]
fn update_replaces_fields_and_requires_id() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let id = repo.insert_note(&Note::new("before", "old", 0)).unwrap();

    let mut note = repo.get_note(id).unwrap().unwrap();
    note.title = "after".to_string();
    note.body = "new".to_string();
    note.position = 5;
    repo.update_note(&note).unwrap();
    assert_eq!(repo.get_note(id).unwrap(), Some(note));

    let err = repo.update_note(&Note::new("x", "y", 0)).unwrap_err();
    assert!(matches!(err, RepoError::MissingId));

    let err = repo
        .update_note(&Note::with_id(id + 100, "x", "y", 0))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id + 100));
}

#[test]
fn delete_removes_row_and_reports_missing() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let id = repo.insert_note(&Note::new("gone", "soon", 0)).unwrap();

    repo.delete_note(id).unwrap();
    assert_eq!(repo.get_note(id).unwrap(), None);
    assert!(matches!(
        repo.delete_note(id).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn list_orders_by_position_then_id() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let third = repo.insert_note(&Note::new("c", "", 2)).unwrap();
    let first = repo.insert_note(&Note::new("a", "", 0)).unwrap();
    let tie_low = repo.insert_note(&Note::new("b1", "", 1)).unwrap();
    let tie_high = repo.insert_note(&Note::new("b2", "", 1)).unwrap();

    let ids: Vec<_> = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .filter_map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![first, tie_low, tie_high, third]);
}

#[test]
fn set_positions_rolls_back_when_any_id_is_missing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let id = repo.insert_note(&Note::new("a", "", 0)).unwrap();

    let err = repo.set_positions(&[(id, 9), (id + 1, 10)]).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(repo.get_note(id).unwrap().unwrap().position, 0);
}

#[test]
fn service_create_appends_notes_in_order() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);

    let first = service.create_note("first", "one").unwrap();
    let second = service.create_note("second", "two").unwrap();
    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
    assert!(first.is_persisted());
    assert!(first.equals_ignore_id(&Note::new("first", "one", 0)));

    let titles: Vec<_> = service
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn service_update_round_trips_and_rejects_unsaved_note() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let mut note = service.create_note("draft", "text").unwrap();

    note.body = "edited text".to_string();
    let updated = service.update_note(&note).unwrap();
    assert_eq!(updated, note);

    let err = service.update_note(&Note::new("x", "y", 0)).unwrap_err();
    assert!(matches!(err, NoteServiceError::Repo(RepoError::MissingId)));
}

#[test]
fn service_delete_maps_missing_note() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);

    let err = service.delete_note(404).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(404)));
}

#[test]
fn move_note_reorders_and_renumbers_densely() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    let a = service.create_note("a", "").unwrap().id.unwrap();
    let b = service.create_note("b", "").unwrap().id.unwrap();
    let c = service.create_note("c", "").unwrap().id.unwrap();
    service.delete_note(b).unwrap();
    let d = service.create_note("d", "").unwrap().id.unwrap();

    let moved = service.move_note(d, 0).unwrap();
    let order: Vec<_> = moved.iter().map(|note| (note.id.unwrap(), note.position)).collect();
    assert_eq!(order, vec![(d, 0), (a, 1), (c, 2)]);
    assert_eq!(service.list_notes().unwrap(), moved);

    let moved = service.move_note(d, 99).unwrap();
    let ids: Vec<_> = moved.iter().map(|note| note.id.unwrap()).collect();
    assert_eq!(ids, vec![a, c, d]);
}

#[test]
fn move_note_reports_unknown_id() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);
    service.create_note("only", "").unwrap();

    let err = service.move_note(12345, 0).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(12345)));
}

#[test]
fn list_previews_truncate_long_bodies() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let service = NoteService::new(repo);
    let long_body = format!("{}bcd efg", "a".repeat(500));
    let short = service.create_note("short", "fits").unwrap();
    let long = service.create_note("long", long_body).unwrap();

    let previews = service.list_previews().unwrap();
    assert_eq!(previews.len(), 2);
    assert_eq!(previews[0].id, short.id.unwrap());
    assert_eq!(previews[0].body, "fits");
    assert_eq!(previews[1].id, long.id.unwrap());
    assert_eq!(previews[1].body, format!("{}bcd ...", "a".repeat(500)));
}
