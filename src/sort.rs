use std::cmp::Ordering;

use crate::entry::{Entry, SortKey};

/// Tri-state sort: off, ascending on a column, descending on a column.
/// Owned by the model and replaced wholesale on every toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    None,
    Asc(SortKey),
    Desc(SortKey),
}

impl SortState {
    /// One step of the header-click cycle. Clicking the active column walks
    /// asc -> desc -> off; clicking any other column restarts at asc.
    pub fn advance(self, clicked: SortKey) -> SortState {
        match self {
            SortState::None => SortState::Asc(clicked),
            SortState::Asc(key) if key == clicked => SortState::Desc(clicked),
            SortState::Asc(_) => SortState::Asc(clicked),
            SortState::Desc(key) if key == clicked => SortState::None,
            SortState::Desc(_) => SortState::Asc(clicked),
        }
    }

    /// Which indicator to draw for a column header, if any.
    pub fn direction_for(&self, column: SortKey) -> Option<Direction> {
        match *self {
            SortState::Asc(key) if key == column => Some(Direction::Ascending),
            SortState::Desc(key) if key == column => Some(Direction::Descending),
            _ => None,
        }
    }

    /// Orders two entries under this sort state. `None` reports everything
    /// as equal so that a stable sort leaves the load order untouched;
    /// descending is the reversed ascending comparator, not its own rule.
    pub fn compare(&self, left: &Entry, right: &Entry) -> Ordering {
        match *self {
            SortState::None => Ordering::Equal,
            SortState::Asc(key) => compare_field(left.field(key), right.field(key)),
            SortState::Desc(key) => compare_field(left.field(key), right.field(key)).reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Case-insensitive lexicographic comparison, with the raw strings as a
/// tiebreak so the order is total and deterministic across runs.
fn compare_field(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
