use std::fmt;
use std::io::Error;

use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

use crate::entry::Entry;

#[derive(Debug)]
pub enum PledgeError {
    IoError(Error),
    PolarsError(PolarsError),
    HttpError(reqwest::Error),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
}

impl From<Error> for PledgeError {
    fn from(err: Error) -> Self {
        PledgeError::IoError(err)
    }
}

impl From<PolarsError> for PledgeError {
    fn from(err: PolarsError) -> Self {
        PledgeError::PolarsError(err)
    }
}

impl From<reqwest::Error> for PledgeError {
    fn from(err: reqwest::Error) -> Self {
        PledgeError::HttpError(err)
    }
}

impl fmt::Display for PledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PledgeError::IoError(e) => write!(f, "io error: {e}"),
            PledgeError::PolarsError(e) => write!(f, "could not parse table data: {e}"),
            PledgeError::HttpError(e) => write!(f, "could not fetch table data: {e}"),
            PledgeError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            PledgeError::FileNotFound => write!(f, "file not found"),
            PledgeError::PermissionDenied => write!(f, "permission denied"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub event_poll_time: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
        }
    }
}

/// Everything the model reacts to. Key events are pre-mapped by the
/// controller, except in search mode where they are forwarded raw.
#[derive(Debug)]
pub enum Message {
    Quit,
    MoveUp(usize),
    MoveDown(usize),
    MoveBeginning,
    MoveEnd,
    MoveLeft,
    MoveRight,
    ToggleSort,
    Search,
    RawKey(KeyEvent),
    CopyTweetUrl,
    OpenTweetUrl,
    Help,
    Exit,
    DataLoaded(Vec<Entry>),
    LoadFailed(String),
}

pub const HELP_TEXT: &str = "\
 pledge-table key bindings

   Up/k, Down/j     select row
   Left/h, Right/l  select column
   PgUp, PgDn       move a page
   g, G             first / last row
   s                cycle sort on column (asc > desc > off)
   /                search across all fields
   Esc              close search / clear query
   c                copy tweet link of selected row
   o                open tweet link in browser
   ?                show this help
   q                quit

 press Esc to close";
