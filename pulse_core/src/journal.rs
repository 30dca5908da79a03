//! Append-only JSONL journal for finished records.
//!
//! Each record is one JSON line, written under an exclusive file lock so that
//! concurrent `ironpulse` processes never interleave partial lines.

use crate::{DietLog, Result, WorkoutLog};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A dated, uniquely identified record that can be journaled
pub trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> Uuid;
    fn date(&self) -> NaiveDate;
}

impl Record for WorkoutLog {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for DietLog {
    fn id(&self) -> Uuid {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Destination for finished records
pub trait RecordSink<T: Record> {
    fn append(&mut self, record: &T) -> Result<()>;
}

/// JSONL-based sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: Record> RecordSink<T> for JsonlSink {
    fn append(&mut self, record: &T) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended record {} to {:?}", record.id(), self.path);
        Ok(())
    }
}

/// In-memory sink, for callers that keep their own collection
impl<T: Record + Clone> RecordSink<T> for Vec<T> {
    fn append(&mut self, record: &T) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Read all records from a journal. Unparseable lines are skipped.
pub fn read_records<T: Record>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping unreadable record at {:?}:{}: {}",
                    path,
                    line_num + 1,
                    e
                );
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
