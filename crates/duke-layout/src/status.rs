//! Job status reporting
//!
//! A conversion job reports its outcome exactly once, either as completed
//! (with the output path) or as failed (with the error category and message).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;

/// Longest error message handed to a status sink, in characters
pub const MAX_STATUS_MESSAGE_LEN: usize = 65_530;

/// Errors raised by a status sink
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives the outcome of conversion jobs
pub trait JobStatus {
    /// The job finished and its output is at `output`
    fn completed(&mut self, job_id: u64, output: &Path) -> Result<(), StatusError>;

    /// The job failed
    fn failed(&mut self, job_id: u64, kind: ErrorKind, message: &str) -> Result<(), StatusError>;
}

/// Cut `message` to at most `max` characters
pub fn truncate_message(message: &str, max: usize) -> &str {
    match message.char_indices().nth(max) {
        Some((end, _)) => &message[..end],
        None => message,
    }
}

/// Reports job outcomes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStatus;

impl JobStatus for LogStatus {
    fn completed(&mut self, job_id: u64, output: &Path) -> Result<(), StatusError> {
        tracing::info!("Job {} completed: {}", job_id, output.display());
        Ok(())
    }

    fn failed(&mut self, job_id: u64, kind: ErrorKind, message: &str) -> Result<(), StatusError> {
        tracing::error!("Job {} failed ({}): {}", job_id, kind, message);
        Ok(())
    }
}

/// Persisted job status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub job_id: u64,
    /// `completed` or `failed`
    pub status: String,
    pub output_path: Option<String>,
    pub error_message: Option<String>,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Writes the latest job status to a JSON file
#[derive(Debug, Clone)]
pub struct JsonStatusFile {
    path: PathBuf,
}

impl JsonStatusFile {
    /// Create a sink writing to `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the status file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the last record
    pub fn read(&self) -> Result<StatusRecord, StatusError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, record: &StatusRecord) -> Result<(), StatusError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}

impl JobStatus for JsonStatusFile {
    fn completed(&mut self, job_id: u64, output: &Path) -> Result<(), StatusError> {
        self.write(&StatusRecord {
            job_id,
            status: "completed".to_string(),
            output_path: Some(output.display().to_string()),
            error_message: None,
            updated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn failed(&mut self, job_id: u64, kind: ErrorKind, message: &str) -> Result<(), StatusError> {
        self.write(&StatusRecord {
            job_id,
            status: "failed".to_string(),
            output_path: None,
            error_message: Some(format!(
                "{}: {}",
                kind,
                truncate_message(message, MAX_STATUS_MESSAGE_LEN)
            )),
            updated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
