//! Moves journaled workout logs into the CSV archive.

use crate::{Error, Intensity, Result, WorkoutLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use uuid::Uuid;

/// A row of `workouts.csv`
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    id: String,
    date: String,
    #[serde(rename = "type")]
    workout_type: String,
    duration: u32,
    calories_burned: u32,
    avg_heart_rate: Option<u32>,
    intensity: Option<Intensity>,
    volume: Option<i64>,
    sets: Option<u32>,
    reps: Option<u32>,
}

impl From<&WorkoutLog> for CsvRow {
    fn from(log: &WorkoutLog) -> Self {
        CsvRow {
            id: log.id.to_string(),
            date: log.date.format("%Y-%m-%d").to_string(),
            workout_type: log.workout_type.clone(),
            duration: log.duration_minutes,
            calories_burned: log.calories_burned,
            avg_heart_rate: log.avg_heart_rate,
            intensity: log.intensity,
            volume: log.volume,
            sets: log.sets,
            reps: log.reps,
        }
    }
}

impl TryFrom<CsvRow> for WorkoutLog {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|e| Error::Other(format!("Invalid date: {}", e)))?;

        Ok(WorkoutLog {
            id,
            date,
            workout_type: row.workout_type,
            duration_minutes: row.duration,
            calories_burned: row.calories_burned,
            avg_heart_rate: row.avg_heart_rate,
            intensity: row.intensity,
            volume: row.volume,
            sets: row.sets,
            reps: row.reps,
        })
    }
}

/// Append every journaled workout to the CSV, then archive the journal.
///
/// The CSV is fsynced before the journal is renamed to `*.jsonl.processed`,
/// so a crash in between can only duplicate rows, never lose them. Readers
/// deduplicate by id.
pub fn rollup_workouts(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let logs: Vec<WorkoutLog> = crate::journal::read_records(journal_path)?;

    if logs.is_empty() {
        tracing::info!("No workouts in journal to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Headers only go into a fresh file
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for log in &logs {
        writer.serialize(CsvRow::from(log))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} workouts to {:?}", logs.len(), csv_path);

    let processed_path = journal_path.with_extension("jsonl.processed");
    std::fs::rename(journal_path, &processed_path)?;
    tracing::info!("Archived journal to {:?}", processed_path);

    Ok(logs.len())
}

/// Read every workout archived in a CSV file. Bad rows are skipped.
pub fn read_workouts_csv(path: &Path) -> Result<Vec<WorkoutLog>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut logs = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result.map_err(Error::from).and_then(WorkoutLog::try_from) {
            Ok(log) => logs.push(log),
            Err(e) => tracing::warn!("Skipping CSV row in {:?}: {}", path, e),
        }
    }

    Ok(logs)
}

/// Remove archived `*.processed` journals in `dir`
pub fn cleanup_processed(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().is_some_and(|ext| ext == "processed") {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed processed journal: {:?}", path);
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed journals", count);
    }

    Ok(count)
}
