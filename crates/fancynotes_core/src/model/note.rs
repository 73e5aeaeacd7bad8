//! Note domain model.
//!
//! # Responsibility
//! - Define the note record (title, body, position, optional storage id).
//! - Provide body truncation for list display.
//! - Provide content comparison that ignores the storage id.
//!
//! # Invariants
//! - `title`, `body` and `position` are always present.
//! - `id` is `None` only before the note is first persisted.
//! - Derived `PartialEq` compares every field, `id` included.
//!
//! # See also
//! - docs/architecture/data-model.md

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier for a persisted note.
pub type NoteId = i64;

/// Bodies longer than this many characters are truncated for display.
pub const TRUNCATED_BODY_MAX_CHARS: usize = 500;

/// Marker appended to a truncated body.
pub const TRUNCATION_SUFFIX: &str = " ...";

// ASCII whitespace, comma, question mark, period, exclamation mark, backslash.
static WORD_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\x0B\x0C\r,?.!\\]").expect("valid word delimiter regex"));

/// Single user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by storage on first insert; `None` for unsaved notes.
    #[serde(default)]
    pub id: Option<NoteId>,
    /// Note heading.
    pub title: String,
    /// Note content.
    pub body: String,
    /// Display/sort order among all notes.
    pub position: i32,
}

impl Note {
    /// Creates a note that has not been persisted yet.
    pub fn new(title: impl Into<String>, body: impl Into<String>, position: i32) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            position,
        }
    }

    /// Creates a note with a known storage id.
    ///
    /// Used by repository read paths.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        position: i32,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, body, position)
        }
    }

    /// Returns whether storage has assigned an id to this note.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the body shortened for list display.
    ///
    /// See [`truncate_body`].
    pub fn truncated_body(&self) -> String {
        truncate_body(&self.body)
    }

    /// Compares title, body and position, ignoring `id`.
    ///
    /// Storage assigns `id` on insert, so a note read back after saving is
    /// never `==` to the value that was saved; this comparison still holds.
    pub fn equals_ignore_id(&self, other: &Note) -> bool {
        self.title == other.title && self.body == other.body && self.position == other.position
    }
}

/// Shortens `body` to the first 500 characters, finishing the word that
/// was cut, followed by `" ..."`.
///
/// Rules:
/// - Bodies of at most 500 characters are returned unchanged.
/// - Otherwise the remainder after the cutoff is scanned for the first
///   whitespace, `,`, `?`, `.`, `!` or `\`; everything before it is kept.
///   With no delimiter the whole remainder is kept.
/// - Lengths count `char`s, so multi-byte text is never split mid-character.
pub fn truncate_body(body: &str) -> String {
    let Some((cutoff, _)) = body.char_indices().nth(TRUNCATED_BODY_MAX_CHARS) else {
        return body.to_string();
    };

    let (head, tail) = body.split_at(cutoff);
    let word_end = WORD_DELIMITER_RE
        .find(tail)
        .map_or(tail.len(), |delimiter| delimiter.start());

    let mut truncated = String::with_capacity(cutoff + word_end + TRUNCATION_SUFFIX.len());
    truncated.push_str(head);
    truncated.push_str(&tail[..word_end]);
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}
