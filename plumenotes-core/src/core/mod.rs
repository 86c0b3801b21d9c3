//! Internal domain modules for the Plume Notes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod autosave;
pub mod error;
pub mod note;
pub mod session;
pub mod store;

#[doc(inline)]
pub use autosave::{AutosaveTimer, AUTOSAVE_WINDOW};
#[doc(inline)]
pub use error::{PlumenotesError, Result};
#[doc(inline)]
pub use note::{IdAllocator, Note, NoteId};
#[doc(inline)]
pub use session::{EditBuffer, Session, SessionState, UiSignal};
#[doc(inline)]
pub use store::{default_data_path, JsonStore, NotesStore};
