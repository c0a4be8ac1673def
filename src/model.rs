use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace, warn};

use crate::domain::Message;
use crate::entry::{COLUMNS, Entry, SortKey};
use crate::search_input::{SearchEdit, SearchInput};
use crate::sort::SortState;

/// Explicit load status. An empty entry list under `Ready` is a valid,
/// non-error state and renders nothing; `Failed` is visually distinct.
#[derive(Debug, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Failed(String),
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modus {
    Table,
    Search,
    Help,
}

/// Owns the entry list, the sort state and the search query. All mutation
/// goes through `update`; derived row output is recomputed on demand by
/// `visible_rows` and never cached.
pub struct Model {
    pub status: Status,
    modus: Modus,
    entries: Vec<Entry>,
    sort: SortState,
    search: String,
    selected_row: usize,
    selected_column: usize,
    input: SearchInput,
    status_message: String,
}

impl Model {
    pub fn new() -> Self {
        Self {
            status: Status::Loading,
            modus: Modus::Table,
            entries: Vec::new(),
            sort: SortState::None,
            search: String::new(),
            selected_row: 0,
            selected_column: 0,
            input: SearchInput::default(),
            status_message: "Loading ...".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: modus {:?}, message {:?}", self.modus, message);

        // Load results arrive from the worker thread in any modus.
        let message = match message {
            Message::DataLoaded(entries) => {
                self.data_loaded(entries);
                return;
            }
            Message::LoadFailed(reason) => {
                self.load_failed(reason);
                return;
            }
            other => other,
        };

        match self.modus {
            Modus::Table => match message {
                Message::Quit => self.quit(),
                Message::MoveUp(step) => self.move_selection_up(step),
                Message::MoveDown(step) => self.move_selection_down(step),
                Message::MoveBeginning => self.move_selection_beginning(),
                Message::MoveEnd => self.move_selection_end(),
                Message::MoveLeft => self.move_column_left(),
                Message::MoveRight => self.move_column_right(),
                Message::ToggleSort => self.handle_sort(self.selected_column_key()),
                Message::Search => self.enter_search(),
                Message::Exit => self.clear_search(),
                Message::CopyTweetUrl => self.copy_tweet_url(),
                Message::OpenTweetUrl => self.open_tweet_url(),
                Message::Help => self.modus = Modus::Help,
                _ => (),
            },
            Modus::Search => match message {
                Message::RawKey(key) => self.search_input(key),
                Message::Quit => self.quit(),
                _ => (),
            },
            Modus::Help => match message {
                Message::Quit => self.quit(),
                Message::Exit | Message::Help => self.modus = Modus::Table,
                _ => (),
            },
        }
    }

    // ------------------------- derived state ------------------------- //

    /// Sorted-then-filtered view of the entries: the full set is stable
    /// sorted first, then the search predicate prunes the sorted sequence,
    /// so surviving rows keep their sort order. Under `SortState::None` the
    /// load order is preserved exactly.
    pub fn visible_rows(&self) -> Vec<&Entry> {
        let mut rows: Vec<&Entry> = self.entries.iter().collect();
        rows.sort_by(|l, r| self.sort.compare(l, r));
        let query = self.search.to_lowercase();
        rows.retain(|entry| entry_matches(entry, &query));
        rows
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.visible_rows().get(self.selected_row).copied()
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// True when there is no loaded data at all, as opposed to a filter
    /// matching zero rows. An empty source renders no table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn selected_column_key(&self) -> SortKey {
        COLUMNS[self.selected_column]
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_edit(&self) -> SearchEdit {
        self.input.current()
    }

    pub fn searching(&self) -> bool {
        self.modus == Modus::Search
    }

    pub fn help_open(&self) -> bool {
        self.modus == Modus::Help
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while raw key events should bypass the normal key map.
    pub fn raw_keyevents(&self) -> bool {
        self.searching()
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    // ----------------------- state transitions ----------------------- //

    fn data_loaded(&mut self, entries: Vec<Entry>) {
        info!("Model received {} entries", entries.len());
        self.entries = entries;
        self.status = Status::Ready;
        self.selected_row = 0;
        self.status_message = format!("Loaded {} candidates", self.entries.len());
    }

    fn load_failed(&mut self, reason: String) {
        warn!("Load failed: {reason}");
        self.entries = Vec::new();
        self.status_message = "Failed to load pledge data".to_string();
        self.status = Status::Failed(reason);
    }

    /// Applies one step of the tri-state sort cycle for `key` and replaces
    /// the stored sort state wholesale.
    pub fn handle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.advance(key);
        debug!("Sort state is now {:?}", self.sort);
        self.status_message = match self.sort {
            SortState::None => "Sorting off".to_string(),
            SortState::Asc(k) => format!("Sorting by {} (ascending)", k.label()),
            SortState::Desc(k) => format!("Sorting by {} (descending)", k.label()),
        };
        self.clamp_selection();
    }

    /// Replaces the search query wholesale. Called once per keystroke while
    /// the search box is open.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.clamp_selection();
    }

    fn enter_search(&mut self) {
        self.modus = Modus::Search;
        // The box reopens with the active query, as the rendered search
        // field keeps its value.
        self.input.set(&self.search);
    }

    fn clear_search(&mut self) {
        if !self.search.is_empty() {
            self.input.clear();
            self.set_search("");
            self.status_message = "Search cleared".to_string();
        }
    }

    fn search_input(&mut self, key: KeyEvent) {
        let edit = self.input.read(key);
        self.set_search(edit.query);
        if edit.canceled {
            self.modus = Modus::Table;
            self.status_message = "Search canceled".to_string();
        } else if edit.committed {
            self.modus = Modus::Table;
            self.status_message = format!("{} rows match", self.visible_rows().len());
        }
    }

    fn copy_tweet_url(&mut self) {
        let Some(url) = self.selected_entry().and_then(Entry::tweet_intent_url) else {
            self.status_message = "Selected row has no tweet link".to_string();
            return;
        };
        match Clipboard::new().and_then(|mut cb| cb.set_text(url)) {
            Ok(()) => self.status_message = "Tweet link copied".to_string(),
            Err(e) => {
                warn!("Error copying to clipboard: {e:?}");
                self.status_message = "Could not access clipboard".to_string();
            }
        }
    }

    fn open_tweet_url(&mut self) {
        let Some(url) = self.selected_entry().and_then(Entry::tweet_intent_url) else {
            self.status_message = "Selected row has no tweet link".to_string();
            return;
        };
        match open::that(&url) {
            Ok(()) => self.status_message = "Opened tweet link".to_string(),
            Err(e) => {
                warn!("Error opening {url}: {e:?}");
                self.status_message = "Could not open browser".to_string();
            }
        }
    }

    // -------------------------- navigation --------------------------- //

    fn move_selection_up(&mut self, step: usize) {
        self.selected_row = self.selected_row.saturating_sub(step);
    }

    fn move_selection_down(&mut self, step: usize) {
        let rows = self.visible_rows().len();
        if rows > 0 {
            self.selected_row = std::cmp::min(self.selected_row + step, rows - 1);
        }
    }

    fn move_selection_beginning(&mut self) {
        self.selected_row = 0;
    }

    fn move_selection_end(&mut self) {
        self.selected_row = self.visible_rows().len().saturating_sub(1);
    }

    fn move_column_left(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    fn move_column_right(&mut self) {
        if self.selected_column < COLUMNS.len() - 1 {
            self.selected_column += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.visible_rows().len();
        self.selected_row = std::cmp::min(self.selected_row, rows.saturating_sub(1));
    }
}

/// OR-across-fields case-insensitive substring test. The query must already
/// be lowercased. An empty query matches everything.
fn entry_matches(entry: &Entry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    entry
        .fields()
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}
