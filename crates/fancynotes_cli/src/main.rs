//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fancynotes_core` linkage.
//! - Optionally print note previews from a notes database file.
//!
//! Usage: `fancynotes_cli [DB_PATH]`

use fancynotes_core::db::open_db;
use fancynotes_core::{NoteService, SqliteNoteRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("fancynotes_core ping={}", fancynotes_core::ping());
    println!("fancynotes_core version={}", fancynotes_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_previews(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to read notes from `{db_path}`: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_previews(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_db(db_path)?;
    let repo = SqliteNoteRepository::try_new(&mut conn)?;
    let previews = NoteService::new(repo).list_previews()?;

    println!("notes={}", previews.len());
    for preview in previews {
        println!(
            "[{}] #{} {}: {}",
            preview.position,
            preview.id,
            preview.title,
            preview.body.replace('\n', " ")
        );
    }
    Ok(())
}
