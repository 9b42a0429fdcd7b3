//! Error types for the catcher's fallible setup paths.

use std::path::PathBuf;

use thiserror::Error;

/// Failures opening the per-run log destination.
///
/// These degrade the server to console-only operation; they never stop
/// request handling.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create log directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
