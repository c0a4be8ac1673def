use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::domain::{Message, PledgeError};
use crate::entry::Entry;

/// CSV export of the published pledge spreadsheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1Od41dP2OjFO4aqunNbckFB_fr6-EVa5mH0wVccm_nB8/export?format=csv";

// Column names of the external spreadsheet schema. This is the only place
// they are referenced.
const COL_NAME: &str = "Name";
const COL_HANDLE: &str = "Twitter_Handle_Entry";
const COL_LINK: &str = "Tweet_Link";
const COL_OFFICE_LEVEL: &str = "Office_Level";
const COL_OFFICE_SOUGHT: &str = "Office_Sought";

#[derive(Debug, Clone)]
pub enum Source {
    Remote(String),
    File(PathBuf),
}

/// Runs the load off the event loop and delivers the outcome as a message.
/// The send result is ignored: a dropped receiver means the app quit first.
pub fn spawn_load(source: Source, tx: mpsc::Sender<Message>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("Loading entries from {:?} ...", source);
        let message = match load(&source) {
            Ok(entries) => {
                info!("Loaded {} entries", entries.len());
                Message::DataLoaded(entries)
            }
            Err(e) => {
                error!("Loading entries failed: {e}");
                Message::LoadFailed(e.to_string())
            }
        };
        let _ = tx.send(message);
    })
}

pub fn load(source: &Source) -> Result<Vec<Entry>, PledgeError> {
    let df = match source {
        Source::Remote(url) => fetch_csv(url)?,
        Source::File(path) => scan_csv_file(path)?,
    };
    debug!("Fetched frame with {} rows", df.height());
    Ok(normalize_entries(&df))
}

fn fetch_csv(url: &str) -> Result<DataFrame, PledgeError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.bytes()?.to_vec();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(body))
        .finish()?;
    Ok(df)
}

fn scan_csv_file(path: &Path) -> Result<DataFrame, PledgeError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PledgeError::FileNotFound,
        ErrorKind::PermissionDenied => PledgeError::PermissionDenied,
        _ => PledgeError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(PledgeError::LoadingFailed("Not a file!".into()));
    }

    let frame = LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()?;
    Ok(frame.collect()?)
}

/// Maps the loosely-specified spreadsheet schema onto `Entry`. Fails softly:
/// a missing column or a null cell becomes an empty string, so downstream
/// sort/filter code can assume every field is a plain string.
pub fn normalize_entries(df: &DataFrame) -> Vec<Entry> {
    let height = df.height();
    let names = column_as_strings(df, COL_NAME, height);
    let handles = column_as_strings(df, COL_HANDLE, height);
    let links = column_as_strings(df, COL_LINK, height);
    let office_levels = column_as_strings(df, COL_OFFICE_LEVEL, height);
    let offices_sought = column_as_strings(df, COL_OFFICE_SOUGHT, height);

    (0..height)
        .map(|row| Entry {
            name: names[row].clone(),
            twitter_handle: handles[row].clone(),
            twitter_link: links[row].clone(),
            office_level: office_levels[row].clone(),
            office_sought: offices_sought[row].clone(),
        })
        .collect()
}

fn column_as_strings(df: &DataFrame, name: &str, height: usize) -> Vec<String> {
    let Ok(column) = df.column(name) else {
        debug!("Column \"{name}\" missing, normalizing to empty strings");
        return vec![String::new(); height];
    };
    let casted = match column.cast(&DataType::String) {
        Ok(c) => c,
        Err(e) => {
            debug!("Column \"{name}\" not castable to strings ({e}), normalizing to empty");
            return vec![String::new(); height];
        }
    };
    match casted.str() {
        Ok(series) => series
            .into_iter()
            .map(|v| v.unwrap_or("").to_string())
            .collect(),
        Err(e) => {
            debug!("Column \"{name}\" not readable as strings ({e}), normalizing to empty");
            vec![String::new(); height]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn normalizes_full_frame_in_row_order() {
        let df = df!(
            COL_NAME => ["Bob", "Ann"],
            COL_HANDLE => ["@bob", "N/A"],
            COL_LINK => ["https://t.co/1", ""],
            COL_OFFICE_LEVEL => ["Federal", "State"],
            COL_OFFICE_SOUGHT => ["Senate", "Governor"]
        )
        .unwrap();

        let entries = normalize_entries(&df);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Bob");
        assert_eq!(entries[0].twitter_handle, "@bob");
        assert_eq!(entries[1].name, "Ann");
        assert_eq!(entries[1].office_sought, "Governor");
    }

    #[test]
    fn missing_columns_normalize_to_empty_strings() {
        let df = df!(COL_NAME => ["Bob", "Ann"]).unwrap();

        let entries = normalize_entries(&df);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Bob");
        assert_eq!(entries[0].twitter_handle, "");
        assert_eq!(entries[0].twitter_link, "");
        assert_eq!(entries[1].office_level, "");
        assert_eq!(entries[1].office_sought, "");
    }

    #[test]
    fn null_cells_normalize_to_empty_strings() {
        let df = df!(
            COL_NAME => [Some("Bob"), None::<&str>],
            COL_HANDLE => [None::<&str>, Some("@ann")]
        )
        .unwrap();

        let entries = normalize_entries(&df);
        assert_eq!(entries[0].twitter_handle, "");
        assert_eq!(entries[1].name, "");
        assert_eq!(entries[1].twitter_handle, "@ann");
    }

    #[test]
    fn non_string_columns_are_cast_to_strings() {
        let df = df!(
            COL_NAME => ["Bob"],
            COL_OFFICE_LEVEL => [3i64]
        )
        .unwrap();

        let entries = normalize_entries(&df);
        assert_eq!(entries[0].office_level, "3");
    }

    #[test]
    fn empty_frame_yields_no_entries() {
        let df = DataFrame::empty();
        assert!(normalize_entries(&df).is_empty());
    }

    #[test]
    fn loads_and_normalizes_a_csv_file() {
        let dir = std::env::temp_dir().join("pledge_table_source_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pledges.csv");
        fs::write(
            &path,
            "Name,Twitter_Handle_Entry,Tweet_Link,Office_Level,Office_Sought\n\
             Ann,@ann,https://t.co/a,Federal,Senate\n\
             Bob,N/A,,State,Governor\n",
        )
        .unwrap();

        let entries = load(&Source::File(path)).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Ann");
        assert_eq!(entries[0].twitter_handle, "@ann");
        assert_eq!(entries[1].name, "Bob");
        // The empty link cell normalizes to an empty string, not a null.
        assert_eq!(entries[1].twitter_link, "");
        assert_eq!(entries[1].office_sought, "Governor");
    }

    #[test]
    fn missing_file_is_reported_as_file_not_found() {
        let source = Source::File(PathBuf::from("/nonexistent/pledges.csv"));
        match load(&source) {
            Err(PledgeError::FileNotFound) => {}
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }
}
