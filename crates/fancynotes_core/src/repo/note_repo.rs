//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Map `Note` values to rows of the `notes` table.
//! - Own storage-assigned ids and bulk position rewrites.
//!
//! # Invariants
//! - Table and column names are declared only in this module.
//! - Inserting a note without `id` lets SQLite generate the key.
//! - Listing is always ordered by `note_position ASC, id ASC`.
//! - `set_positions` rewrites all requested rows or none of them.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage table for notes.
pub const NOTES_TABLE: &str = "notes";
/// Primary key column, autogenerated when absent on insert.
pub const COLUMN_ID: &str = "id";
/// `Note::title` column.
pub const COLUMN_TITLE: &str = "note_title";
/// `Note::body` column.
pub const COLUMN_BODY: &str = "note_body";
/// `Note::position` column.
pub const COLUMN_POSITION: &str = "note_position";

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    note_title,
    note_body,
    note_position
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No row exists for the given id.
    NotFound(NoteId),
    /// The operation needs a persisted note but `id` is `None`.
    MissingId,
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::MissingId => write!(f, "note has no id; insert it before updating"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "required column `{table}.{column}` is missing; run migrations first"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note and returns its id (generated when `note.id` is `None`).
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title, body and position of a persisted note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Deletes one note by id.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists all notes ordered by position, then id.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Returns the position just after the current maximum, or `0` if empty.
    fn next_position(&self) -> RepoResult<i32>;
    /// Rewrites positions for many notes in one transaction.
    fn set_positions(&mut self, positions: &[(NoteId, i32)]) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `notes`
    ///   schema has not been applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        // NULL in an INTEGER PRIMARY KEY column asks SQLite for a fresh rowid.
        self.conn.execute(
            "INSERT INTO notes (id, note_title, note_body, note_position)
             VALUES (?1, ?2, ?3, ?4);",
            params![note.id, note.title, note.body, note.position],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let id = note.id.ok_or(RepoError::MissingId)?;
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                note_title = ?2,
                note_body = ?3,
                note_position = ?4
             WHERE id = ?1;",
            params![id, note.title, note.body, note.position],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let sql = format!("{NOTE_SELECT_SQL} WHERE id = ?1;");
        let note = self.conn.query_row(&sql, [id], parse_note_row).optional()?;
        Ok(note)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let sql = format!("{NOTE_SELECT_SQL} ORDER BY note_position ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn next_position(&self) -> RepoResult<i32> {
        let max: Option<i64> =
            self.conn
                .query_row("SELECT MAX(note_position) FROM notes;", [], |row| row.get(0))?;
        match max {
            None => Ok(0),
            Some(value) => i32::try_from(value + 1).map_err(|_| {
                RepoError::InvalidData(format!("note_position {value} has no successor"))
            }),
        }
    }

    fn set_positions(&mut self, positions: &[(NoteId, i32)]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare("UPDATE notes SET note_position = ?2 WHERE id = ?1;")?;
            for (id, position) in positions {
                if stmt.execute(params![id, position])? == 0 {
                    // Dropping `tx` without commit rolls back earlier rows.
                    return Err(RepoError::NotFound(*id));
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note::with_id(
        row.get::<_, NoteId>(COLUMN_ID)?,
        row.get::<_, String>(COLUMN_TITLE)?,
        row.get::<_, String>(COLUMN_BODY)?,
        row.get::<_, i32>(COLUMN_POSITION)?,
    ))
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, NOTES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(NOTES_TABLE));
    }

    for column in [COLUMN_ID, COLUMN_TITLE, COLUMN_BODY, COLUMN_POSITION] {
        if !table_has_column(conn, NOTES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: NOTES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{NoteRepository, RepoError, SqliteNoteRepository};
    use crate::db::open_db_in_memory;
    use crate::model::note::Note;
    use rusqlite::Connection;

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let mut conn = Connection::open_in_memory().unwrap();
        let err = SqliteNoteRepository::try_new(&mut conn)
            .err()
            .expect("bare connection must be rejected");
        assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
    }

    #[test]
    fn try_new_rejects_table_without_position_column() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, note_title TEXT, note_body TEXT);",
        )
        .unwrap();
        let err = SqliteNoteRepository::try_new(&mut conn)
            .err()
            .expect("incomplete schema must be rejected");
        assert!(matches!(
            err,
            RepoError::MissingRequiredColumn {
                table: "notes",
                column: "note_position"
            }
        ));
    }

    #[test]
    fn next_position_starts_at_zero_and_follows_max() {
        let mut conn = open_db_in_memory().unwrap();
        let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        assert_eq!(repo.next_position().unwrap(), 0);

        repo.insert_note(&Note::new("a", "a", 7)).unwrap();
        repo.insert_note(&Note::new("b", "b", 2)).unwrap();
        assert_eq!(repo.next_position().unwrap(), 8);
    }
}
