//! The note session controller.
//!
//! [`Session`] owns all in-memory application state — the notes collection,
//! the selection and its edit buffer, the search query, the saving and error
//! flags — and mediates every user action. It is the single writer to the
//! [`NotesStore`]: edits are persisted after a debounce window, structural
//! changes (create, delete) are persisted immediately.
//!
//! The controller is single-threaded and host-driven. Mutating methods react
//! to discrete UI events; the host event loop asks [`Session::next_autosave_deadline`]
//! how long it may sleep and calls [`Session::tick`] when the deadline passes.

use crate::core::autosave::{AutosaveTimer, AUTOSAVE_WINDOW};
use crate::core::note::IdAllocator;
use crate::{JsonStore, Note, NoteId, NotesStore};
use chrono::Utc;
use std::time::{Duration, Instant};

/// The observable state of a session, derived from its flags.
///
/// A session starts in `Loading` and stays in the `Ready` sub-states
/// (`Idle`, `Editing`, `Saving`, `ErrorDisplayed`) until process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The store has not been read yet.
    Loading,
    /// No note is selected.
    Idle,
    /// The note with this id is selected and bound to the edit buffer.
    Editing(NoteId),
    /// A persistence call is in flight.
    Saving,
    /// An error message is visible to the user.
    ErrorDisplayed,
}

/// One-shot requests from the controller to the presentation layer.
///
/// Drained with [`Session::take_signals`]; the controller never renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// Move keyboard focus to the title field (after creating a note).
    FocusTitle,
}

/// The mutable title/content pair bound to the visible editor.
///
/// Mirrors the selected note at all times; `update_title` / `update_content`
/// write both synchronously so the sidebar preview stays live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
}

/// All in-memory state for one run of the application, over a [`NotesStore`].
pub struct Session<S: NotesStore = JsonStore> {
    store: S,
    notes: Vec<Note>,
    selected_id: Option<NoteId>,
    edit_buffer: EditBuffer,
    search_query: String,
    dirty: bool,
    saving: bool,
    error: Option<String>,
    delete_pending: bool,
    loaded: bool,
    autosave: AutosaveTimer,
    ids: IdAllocator,
    signals: Vec<UiSignal>,
}

impl<S: NotesStore> Session<S> {
    /// Creates a session in the `Loading` state with the default 500 ms
    /// autosave window. Call [`Session::load_session`] before anything else.
    pub fn new(store: S) -> Self {
        Self::with_autosave_window(store, AUTOSAVE_WINDOW)
    }

    /// Creates a session with a custom autosave window.
    pub fn with_autosave_window(store: S, window: Duration) -> Self {
        Self {
            store,
            notes: Vec::new(),
            selected_id: None,
            edit_buffer: EditBuffer::default(),
            search_query: String::new(),
            dirty: false,
            saving: false,
            error: None,
            delete_pending: false,
            loaded: false,
            autosave: AutosaveTimer::new(window),
            ids: IdAllocator::seeded_from(&[]),
            signals: Vec::new(),
        }
    }

    /// Reads the store and transitions `Loading → Ready`.
    ///
    /// A load failure is not fatal: the session becomes usable with an empty
    /// collection and a visible error message, so the user can still create
    /// notes even when the historical store is unreadable. Callable again
    /// from `Ready` as an explicit reload.
    pub fn load_session(&mut self) {
        self.autosave.cancel();
        match self.store.load() {
            Ok(notes) => {
                self.ids = IdAllocator::seeded_from(&notes);
                self.notes = notes;
                self.error = None;
            }
            Err(e) => {
                log::warn!("failed to load notes: {e}");
                self.notes = Vec::new();
                self.error = Some(format!("Failed to load notes: {}", e.user_message()));
            }
        }
        self.selected_id = None;
        self.edit_buffer = EditBuffer::default();
        self.dirty = false;
        self.delete_pending = false;
        self.loaded = true;
    }

    /// Prepends a new empty note, selects it, and persists immediately.
    ///
    /// Structural changes bypass the debounce window. Any pending debounced
    /// edit is covered by this full-collection write, so its deadline is
    /// cancelled rather than left to fire redundantly. Queues
    /// [`UiSignal::FocusTitle`] for the presentation layer.
    pub fn create_note(&mut self) -> NoteId {
        self.autosave.cancel();
        let note = Note::new(self.ids.next());
        let id = note.id;
        self.notes.insert(0, note);
        self.selected_id = Some(id);
        self.edit_buffer = EditBuffer::default();
        self.dirty = true;
        self.persist();
        self.signals.push(UiSignal::FocusTitle);
        id
    }

    /// Selects the note with `id` and loads it into the edit buffer.
    ///
    /// A no-op if `id` is not in the collection. A pending debounced edit is
    /// flushed first, so the `updated_at` stamp lands on the note that was
    /// actually edited rather than the new selection.
    pub fn select_note(&mut self, id: NoteId) {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return;
        };
        self.error = None;
        if self.autosave.is_pending() {
            self.flush_save();
        }
        let note = &self.notes[index];
        self.edit_buffer = EditBuffer {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.selected_id = Some(id);
    }

    /// Writes `text` into the edit buffer and the selected note, and
    /// (re)starts the debounce window. A no-op without a selection.
    pub fn update_title(&mut self, text: String) {
        let Some(id) = self.selected_id else { return };
        self.edit_buffer.title = text.clone();
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.title = text;
        }
        self.mark_edited();
    }

    /// Writes `text` into the edit buffer and the selected note, and
    /// (re)starts the debounce window. A no-op without a selection.
    pub fn update_content(&mut self, text: String) {
        let Some(id) = self.selected_id else { return };
        self.edit_buffer.content = text.clone();
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.content = text;
        }
        self.mark_edited();
    }

    fn mark_edited(&mut self) {
        self.dirty = true;
        self.autosave.schedule(Instant::now());
    }

    /// Fires the debounced autosave if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.autosave.fire_if_due(now) {
            self.flush_save();
        }
    }

    /// When the host event loop should next call [`Session::tick`].
    pub fn next_autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    /// Stamps `updated_at` on the selected note and persists the collection.
    ///
    /// On failure the in-memory state is left unchanged — the edit is not
    /// lost, only the persisted copy is stale until the next successful save.
    pub fn flush_save(&mut self) {
        self.autosave.cancel();
        if let Some(id) = self.selected_id {
            if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
                note.updated_at = Some(Utc::now());
            }
        }
        self.persist();
    }

    /// Explicit retry after a failed save. A no-op when nothing is unsaved.
    pub fn retry_save(&mut self) {
        if self.dirty {
            self.flush_save();
        }
    }

    /// Asks for delete confirmation. A no-op without a selection; no data
    /// changes until [`Session::confirm_delete`].
    pub fn request_delete(&mut self) {
        if self.selected_id.is_some() {
            self.delete_pending = true;
        }
    }

    /// Removes the selected note, clears the selection, and persists
    /// immediately. Deleting the last note leaves an empty selection, not an
    /// error.
    pub fn confirm_delete(&mut self) {
        self.delete_pending = false;
        let Some(id) = self.selected_id else { return };
        // The deadline must die with the note: a debounced save scheduled for
        // an edit of this note may not fire after it is gone.
        self.autosave.cancel();
        self.notes.retain(|n| n.id != id);
        self.selected_id = None;
        self.edit_buffer = EditBuffer::default();
        self.dirty = true;
        self.persist();
    }

    /// Dismisses the confirmation with no data change.
    pub fn cancel_delete(&mut self) {
        self.delete_pending = false;
    }

    /// Case-insensitive substring filter over title and content.
    ///
    /// Pure and synchronous; never mutates or persists the collection.
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a Note> {
        self.notes.iter().filter(|n| n.matches(query)).collect()
    }

    /// Sets the live sidebar query used by [`Session::visible_notes`].
    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
    }

    /// Clears the live sidebar query.
    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    /// The sidebar view: the collection filtered by the live query.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.search(&self.search_query)
    }

    /// Clears the visible error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Drains queued one-shot signals for the presentation layer.
    pub fn take_signals(&mut self) -> Vec<UiSignal> {
        std::mem::take(&mut self.signals)
    }

    /// The observable state, derived from the session's flags.
    pub fn state(&self) -> SessionState {
        if !self.loaded {
            return SessionState::Loading;
        }
        if self.saving {
            return SessionState::Saving;
        }
        if self.error.is_some() {
            return SessionState::ErrorDisplayed;
        }
        match self.selected_id {
            Some(id) => SessionState::Editing(id),
            None => SessionState::Idle,
        }
    }

    /// The full collection, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The selected note's id, if any.
    pub fn selected_id(&self) -> Option<NoteId> {
        self.selected_id
    }

    /// The selected note, if any.
    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected_id?;
        self.notes.iter().find(|n| n.id == id)
    }

    /// The editor's title/content pair.
    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.edit_buffer
    }

    /// The live sidebar query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether a persistence call is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether in-memory state has changes the store has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The visible error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a delete confirmation is awaiting an answer.
    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Writes the full collection through the store, maintaining the saving
    /// flag and the error message. In-memory state survives a failure.
    fn persist(&mut self) {
        self.saving = true;
        let result = self.store.save(&self.notes);
        self.saving = false;
        match result {
            Ok(()) => {
                self.dirty = false;
                self.error = None;
            }
            Err(e) => {
                log::warn!("failed to save notes: {e}");
                self.error = Some(format!("Failed to save notes: {}", e.user_message()));
            }
        }
    }
}
