use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// Line editor for the search box. Every edit returns the full current
/// query so the model can replace its stored search wholesale per keystroke.
#[derive(Default)]
pub struct SearchInput {
    query: String,
    cursor: usize, // position in chars, not bytes
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchEdit {
    pub query: String,
    pub cursor: usize,
    pub committed: bool,
    pub canceled: bool,
}

impl SearchInput {
    pub fn read(&mut self, key: KeyEvent) -> SearchEdit {
        let edit = match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => self.commit(),
            (KeyCode::Esc, KeyModifiers::NONE) => self.cancel(),
            (KeyCode::Backspace, KeyModifiers::NONE) => self.backspace(),
            (KeyCode::Left, KeyModifiers::NONE) => self.left(),
            (KeyCode::Right, KeyModifiers::NONE) => self.right(),
            (code, _) => self.insert(code),
        };
        trace!("Search edit: {edit:?}");
        edit
    }

    /// Replaces the buffer, placing the cursor at the end.
    pub fn set(&mut self, query: &str) {
        self.query = query.to_string();
        self.cursor = self.query.chars().count();
    }

    pub fn current(&self) -> SearchEdit {
        SearchEdit {
            query: self.query.clone(),
            cursor: self.cursor,
            committed: false,
            canceled: false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn commit(&mut self) -> SearchEdit {
        let mut edit = self.current();
        edit.committed = true;
        edit
    }

    fn cancel(&mut self) -> SearchEdit {
        self.clear();
        let mut edit = self.current();
        edit.canceled = true;
        edit
    }

    fn backspace(&mut self) -> SearchEdit {
        if self.cursor > 0 {
            self.cursor -= 1;
            let pos = self.byte_pos();
            self.query.remove(pos);
        }
        self.current()
    }

    fn left(&mut self) -> SearchEdit {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    fn right(&mut self) -> SearchEdit {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
        self.current()
    }

    fn insert(&mut self, code: KeyCode) -> SearchEdit {
        if let Some(chr) = code.as_char() {
            let pos = self.byte_pos();
            self.query.insert(pos, chr);
            self.cursor += 1;
        }
        self.current()
    }

    fn byte_pos(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.query.len())
    }
}
