//! Application state.
//!
//! `App` owns the bounded joke list, the scroll selection, and the status
//! line.  It contains no rendering (see [`crate::ui`]) and no I/O — the main
//! loop feeds it jokes from the worker channel and key events from the
//! terminal.

use ratatui::widgets::ListState;

use crate::list::{BoundedList, ListError};
use crate::source::JokeItem;

pub struct App {
    /// The most recent jokes, oldest first, newest appended at the end.
    pub jokes: BoundedList<JokeItem>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message shown in the bottom bar.
    pub status: String,
}

impl App {
    /// Build the app state, pre-populating the list from a persisted
    /// snapshot (which may overflow `capacity`; the oldest entries are
    /// dropped).
    pub fn new(capacity: usize, persisted: Vec<JokeItem>) -> Result<Self, ListError> {
        Ok(Self {
            jokes: BoundedList::with_items(capacity, persisted)?,
            list_state: ListState::default(),
            quit: false,
            status: "Waiting for the first joke…".into(),
        })
    }

    /// Append a freshly fetched joke.
    ///
    /// Returns whether an older joke was evicted to make room, so the
    /// caller can phrase the status line accordingly.
    pub fn push_joke(&mut self, joke: JokeItem) -> bool {
        self.jokes.push(joke)
    }

    /// The joke at `index`, reported as an error (never a panic) when the
    /// index is stale or out of range.
    pub fn joke(&self, index: usize) -> Result<&JokeItem, ListError> {
        self.jokes.get(index)
    }

    pub fn joke_count(&self) -> usize {
        self.jokes.len()
    }

    pub fn capacity(&self) -> usize {
        self.jokes.capacity()
    }

    /// Snapshot for the persistence store.
    pub fn snapshot(&self) -> Vec<JokeItem> {
        self.jokes.snapshot()
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.jokes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.jokes.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.jokes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.jokes.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.jokes.is_empty() {
            self.list_state.select(Some(self.jokes.len() - 1));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
