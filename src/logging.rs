use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::domain::PledgeError;

/// Initialize file-based tracing. The TUI owns the terminal, so logs go to
/// a file the user can follow with `tail -f`. Respects RUST_LOG, defaults
/// to "info".
pub fn init(log_path: &Path) -> Result<(), PledgeError> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PledgeError::LoadingFailed(format!("invalid log path {log_path:?}")))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| PledgeError::LoadingFailed("tracing subscriber already set".to_string()))
}
