//! Core library for Plume Notes — a single-user desktop note-taking application.
//!
//! The primary entry point is [`Session`], which owns all in-memory state for
//! one run of the application and mediates every user action: create, select,
//! edit, delete, and search. Edits are autosaved after a debounce window;
//! structural changes are persisted immediately. Persistence goes through the
//! [`NotesStore`] trait, whose production implementation [`JsonStore`] keeps
//! the whole collection in one JSON file under the per-user data directory.
//!
//! The presentation layer lives in a separate crate and consumes this one
//! only through `Session`'s method contract and the accessors it exposes.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    autosave::{AutosaveTimer, AUTOSAVE_WINDOW},
    error::{PlumenotesError, Result},
    note::{IdAllocator, Note, NoteId},
    session::{EditBuffer, Session, SessionState, UiSignal},
    store::{default_data_path, JsonStore, NotesStore},
};
