//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, note-level functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens its own connection to the resolved notes DB path.
//!
//! # See also
//! - docs/architecture/logging.md

use fancynotes_core::db::open_db;
use fancynotes_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteService, SqliteNoteRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const NOTES_DB_FILE_NAME: &str = "fancynotes.sqlite3";
const NOTES_DB_PATH_ENV: &str = "FANCYNOTES_DB_PATH";
static NOTES_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

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
        Err(err) => err,
    }
}

/// Note shape passed to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    /// Full body text.
    pub body: String,
    /// Body shortened for list display.
    pub truncated_body: String,
    pub position: i32,
}

/// Envelope for single-note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteResponse {
    pub ok: bool,
    /// Affected note, when the operation yields one.
    pub note: Option<NoteItem>,
    pub message: String,
}

/// Envelope for list-returning operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    /// Notes in position order; empty on failure.
    pub items: Vec<NoteItem>,
    pub message: String,
}

impl NoteResponse {
    fn success(message: impl Into<String>, note: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            note,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

impl NotesListResponse {
    fn from_result(operation: &str, result: Result<Vec<Note>, String>) -> Self {
        match result {
            Ok(notes) => {
                let items = notes.iter().filter_map(to_note_item).collect::<Vec<_>>();
                Self {
                    message: format!("{} note(s).", items.len()),
                    ok: true,
                    items,
                }
            }
            Err(err) => {
                warn!("event={operation} module=ffi status=error");
                Self {
                    ok: false,
                    items: Vec::new(),
                    message: format!("{operation} failed: {err}"),
                }
            }
        }
    }
}

/// Lists all notes in position order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    NotesListResponse::from_result(
        "notes_list",
        with_note_service(|service| service.list_notes().map_err(|err| err.to_string())),
    )
}

/// Gets one note by id. `ok` with `note=None` means it does not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(id: i64) -> NoteResponse {
    match with_note_service(|service| service.get_note(id).map_err(|err| err.to_string())) {
        Ok(Some(note)) => NoteResponse::success("Note found.", to_note_item(&note)),
        Ok(None) => NoteResponse::success("Note not found.", None),
        Err(err) => NoteResponse::failure(format!("note_get failed: {err}")),
    }
}

/// Creates a note at the end of the list.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, body: String) -> NoteResponse {
    match with_note_service(|service| {
        service
            .create_note(title, body)
            .map_err(|err| err.to_string())
    }) {
        Ok(note) => NoteResponse::success("Note created.", to_note_item(&note)),
        Err(err) => NoteResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Replaces title and body of an existing note, keeping its position.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(id: i64, title: String, body: String) -> NoteResponse {
    let result = with_note_service(|service| {
        let mut note = service
            .get_note(id)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("note not found: {id}"))?;
        note.title = title;
        note.body = body;
        service.update_note(&note).map_err(|err| err.to_string())
    });
    match result {
        Ok(note) => NoteResponse::success("Note updated.", to_note_item(&note)),
        Err(err) => NoteResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Deletes one note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: i64) -> NoteResponse {
    match with_note_service(|service| service.delete_note(id).map_err(|err| err.to_string())) {
        Ok(()) => NoteResponse::success("Note deleted.", None),
        Err(err) => NoteResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Moves one note to a zero-based index and returns the reordered list.
#[flutter_rust_bridge::frb(sync)]
pub fn note_move(id: i64, to_index: u32) -> NotesListResponse {
    let to_index = usize::try_from(to_index).unwrap_or(usize::MAX);
    NotesListResponse::from_result(
        "note_move",
        with_note_service(|service| {
            service
                .move_note(id, to_index)
                .map_err(|err| err.to_string())
        }),
    )
}

fn resolve_notes_db_path() -> PathBuf {
    NOTES_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(NOTES_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(NOTES_DB_FILE_NAME)
        })
        .clone()
}

fn with_note_service<T>(
    f: impl FnOnce(&mut NoteService<SqliteNoteRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_notes_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("notes DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&mut conn)
        .map_err(|err| format!("notes repo init failed: {err}"))?;
    let mut service = NoteService::new(repo);
    f(&mut service)
}

fn to_note_item(note: &Note) -> Option<NoteItem> {
    Some(NoteItem {
        id: note.id?,
        title: note.title.clone(),
        body: note.body.clone(),
        truncated_body: note.truncated_body(),
        position: note.position,
    })
}
