//! Diagnostic logging to a file; the terminal belongs to the TUI.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `callbook=debug`.
pub const LOG_FILTER_ENV: &str = "CALLBOOK_LOG";

/// `~/.local/share/callbook/callbook.log` on Linux; platform equivalent elsewhere.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("callbook").join("callbook.log"))
}

/// Builds the filter from [`LOG_FILTER_ENV`], falling back to `info`.
fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a global subscriber appending plain-text events to `path`.
///
/// Creates the parent directory if needed. Does nothing if a subscriber is
/// already installed.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn init_creates_log_file_and_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("callbook.log");
        init(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn init_fails_when_path_is_a_directory() {
        let dir = tempdir().unwrap();
        assert!(init(dir.path()).is_err());
    }

    #[test]
    fn default_log_path_is_under_app_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("callbook/callbook.log"));
        }
    }
}
