//! Domain model for user-authored notes.
//!
//! # Responsibility
//! - Define the plain `Note` value shared by storage, services and FFI.
//! - Provide pure display/comparison helpers over that value.
//!
//! # Invariants
//! - Model types carry no storage annotations; the SQLite mapping lives in
//!   `repo::note_repo` and `db::migrations`.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
