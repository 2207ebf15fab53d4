//! Service layer for the feed builder.
//!
//! This module contains the business logic for:
//! - Embedded state extraction (`extract_state`, `InitialState`)
//! - Description cleanup (`normalize_description`, `format_text`)
//! - Profile page fetching (`ProfileFetcher`)
//! - Note detail enrichment (`NoteEnricher`)
//! - Summary-level listing (`BasicNotesSource`, `CachedProfileNotes`)

mod basic;
mod notes;
mod profile;
mod state;
mod text;

pub use basic::{BasicNotesSource, CachedProfileNotes, format_note};
pub use notes::{NoteEnricher, render_note};
pub use profile::ProfileFetcher;
pub use state::{InitialState, STATE_MARKER, extract_state, undefined_to_null};
pub use text::{format_text, normalize_description};
