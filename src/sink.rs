//! Append-only JSON-lines persistence for captured requests.
//!
//! # Responsibilities
//! - Open one log file per process run, named from the start timestamp
//! - Append exactly one JSON line per captured record
//!
//! # Design Decisions
//! - The file handle is guarded by a mutex so concurrent requests never
//!   interleave mid-line
//! - Every failure past startup is a diagnostic, never a request failure;
//!   a sink that could not open degrades to dropping records

use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::SinkError;
use crate::record::RequestRecord;

/// Per-run log file name, derived from process start time.
const RUN_FILE_FORMAT: &str = "run-%Y-%m-%d-%H-%M-%S.log";

pub struct LogSink {
    file: Option<Mutex<fs::File>>,
    path: Option<PathBuf>,
}

impl LogSink {
    /// Open this run's log file under `dir`, creating the directory if
    /// absent.
    pub async fn open(dir: &Path) -> Result<Self, SinkError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|source| SinkError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })?;

        let name = chrono::Local::now().format(RUN_FILE_FORMAT).to_string();
        let path = dir.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| SinkError::OpenFile {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            file: Some(Mutex::new(file)),
            path: Some(path),
        })
    }

    /// A sink that drops every record; used when the log file cannot be
    /// opened.
    pub fn disabled() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// Path of this run's log file, if one is open.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `record` as one JSON line and flush.
    ///
    /// Write failures are reported as diagnostics; the caller's request
    /// still succeeds.
    pub async fn append(&self, record: &RequestRecord) {
        let Some(file) = &self.file else { return };

        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(
                    sequence = record.sequence_number,
                    %error,
                    "Failed to serialize log record"
                );
                return;
            }
        };

        let mut guard = file.lock().await;
        let result = async {
            guard.write_all(line.as_bytes()).await?;
            guard.write_all(b"\n").await?;
            guard.flush().await
        }
        .await;
        if let Err(error) = result {
            tracing::warn!(
                sequence = record.sequence_number,
                %error,
                "Failed to append log record"
            );
        }
    }
}
