#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Append-only journal of user interactions and delivery outcomes.
//!
//! This is the estimator's entire analytics surface: one JSON line per
//! event, written locally. No pipeline, no upload.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Single journaled interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Timestamp in ISO8601.
    pub timestamp: DateTime<Utc>,
    /// Short action label (e.g. `calculate.requested`).
    pub action: String,
    /// Arbitrary JSON detail fields.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub detail: serde_json::Map<String, serde_json::Value>,
}

impl InteractionRecord {
    /// Creates a record for the given action.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            detail: serde_json::Map::new(),
        }
    }

    /// Attaches one detail field.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.detail.insert(key.into(), value.into());
        self
    }
}

/// Thread-safe JSON-lines journal with append-only semantics.
#[derive(Debug)]
pub struct InteractionLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl InteractionLogger {
    /// Creates or opens a journal at the desired path.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parent directories cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Appends one record as a JSON line.
    ///
    /// # Errors
    ///
    /// Fails when the line cannot be written to the journal file.
    pub fn record(&self, record: &InteractionRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns the underlying file path (useful for tests).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_json_lines() {
        let dir = tempdir().unwrap();
        let logger = InteractionLogger::new(dir.path().join("interactions.log")).unwrap();
        logger
            .record(&InteractionRecord::new("calculate.requested").with_detail("improvement", 25))
            .unwrap();
        logger.record(&InteractionRecord::new("modal.opened")).unwrap();
        let content = fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"action\":\"calculate.requested\""));
        assert!(lines[0].contains("\"improvement\":25"));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/interactions.log");
        let logger = InteractionLogger::new(&nested).unwrap();
        logger.record(&InteractionRecord::new("session.started")).unwrap();
        assert!(nested.exists());
    }
}
