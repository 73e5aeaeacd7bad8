//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/get/list/delete APIs for UI callers.
//! - Keep note ordering dense when notes are moved.
//! - Project notes into list previews with truncated bodies.
//!
//! # Invariants
//! - New notes are appended after the current last position.
//! - A note read back after a write must match the written content
//!   (`Note::equals_ignore_id`).
//! - After `move_note`, positions are exactly `0..n` in list order.
//! - Log events carry ids and counts only, never titles or bodies.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// List-item projection of a note for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePreview {
    pub id: NoteId,
    pub title: String,
    /// `Note::truncated_body` of the stored body.
    pub body: String,
    pub position: i32,
}

impl NotePreview {
    fn from_note(note: &Note) -> Option<Self> {
        Some(Self {
            id: note.id?,
            title: note.title.clone(),
            body: note.truncated_body(),
            position: note.position,
        })
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note at the end of the list.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::new(title, body, self.repo.next_position()?);
        let id = self.repo.insert_note(&note)?;
        let stored = self.read_back(id, &note, "created note not found in read-back")?;
        info!(
            "event=note_create module=service status=ok note_id={} position={}",
            id, stored.position
        );
        Ok(stored)
    }

    /// Replaces title, body and position of a persisted note.
    pub fn update_note(&self, note: &Note) -> Result<Note, NoteServiceError> {
        self.repo.update_note(note)?;
        let id = note.id.ok_or(RepoError::MissingId)?;
        let stored = self.read_back(id, note, "updated note not found in read-back")?;
        info!("event=note_update module=service status=ok note_id={id}");
        Ok(stored)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    /// Lists notes ordered by position.
    pub fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.repo.list_notes()
    }

    /// Lists notes as display previews with truncated bodies.
    pub fn list_previews(&self) -> RepoResult<Vec<NotePreview>> {
        let notes = self.repo.list_notes()?;
        Ok(notes.iter().filter_map(NotePreview::from_note).collect())
    }

    /// Deletes one note. Remaining positions are left untouched.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    /// Moves one note to `to_index` in position order and renumbers all
    /// notes densely from `0`.
    ///
    /// `to_index` past the end moves the note last.
    pub fn move_note(
        &mut self,
        id: NoteId,
        to_index: usize,
    ) -> Result<Vec<Note>, NoteServiceError> {
        let mut notes = self.repo.list_notes()?;
        let from_index = notes
            .iter()
            .position(|note| note.id == Some(id))
            .ok_or(NoteServiceError::NoteNotFound(id))?;

        let moved = notes.remove(from_index);
        let to_index = to_index.min(notes.len());
        notes.insert(to_index, moved);

        let mut positions = Vec::with_capacity(notes.len());
        for (index, note) in notes.iter_mut().enumerate() {
            let position = i32::try_from(index)
                .map_err(|_| NoteServiceError::InconsistentState("note count exceeds i32"))?;
            let note_id = note
                .id
                .ok_or(NoteServiceError::InconsistentState("listed note without id"))?;
            note.position = position;
            positions.push((note_id, position));
        }

        if let Err(err) = self.repo.set_positions(&positions) {
            warn!(
                "event=note_move module=service status=error note_id={} error={}",
                id, err
            );
            return Err(err.into());
        }
        info!(
            "event=note_move module=service status=ok note_id={} from_index={} to_index={}",
            id, from_index, to_index
        );
        Ok(notes)
    }

    fn read_back(
        &self,
        id: NoteId,
        written: &Note,
        missing: &'static str,
    ) -> Result<Note, NoteServiceError> {
        let stored = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(missing))?;
        if !stored.equals_ignore_id(written) {
            return Err(NoteServiceError::InconsistentState(
                "stored note content differs from written note",
            ));
        }
        Ok(stored)
    }
}
