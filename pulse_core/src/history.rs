//! Workout history over a trailing window of days.

use crate::journal::Record;
use crate::{Result, WorkoutLog};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use std::path::Path;

/// Load workouts dated within the last `days` days (today included).
///
/// Journal entries win over archived CSV rows with the same id.
/// Returns logs sorted newest first.
pub fn load_recent_workouts(
    journal_path: &Path,
    csv_path: &Path,
    days: i64,
    today: NaiveDate,
) -> Result<Vec<WorkoutLog>> {
    let span = u64::try_from(days.max(1) - 1).unwrap_or(0);
    let cutoff = today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    let mut logs = Vec::new();
    let mut seen_ids = HashSet::new();

    let journaled: Vec<WorkoutLog> = crate::journal::read_records(journal_path)?;
    let archived = crate::rollup::read_workouts_csv(csv_path)?;
    let journal_count = journaled.len();

    for log in journaled.into_iter().chain(archived) {
        if log.date() >= cutoff && log.date() <= today && seen_ids.insert(log.id()) {
            logs.push(log);
        }
    }

    // Stable sort keeps journal order for same-day entries
    logs.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::debug!(
        "Loaded {} workouts from last {} days ({} journaled)",
        logs.len(),
        days,
        journal_count
    );

    Ok(logs)
}

/// Totals over a set of workouts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkoutSummary {
    pub workouts: usize,
    pub minutes: u64,
    pub calories: u64,
    pub volume: i64,
    pub sets: u64,
}

impl WorkoutSummary {
    pub fn from_logs(logs: &[WorkoutLog]) -> Self {
        logs.iter().fold(Self::default(), |mut acc, log| {
            acc.workouts += 1;
            acc.minutes += u64::from(log.duration_minutes);
            acc.calories += u64::from(log.calories_burned);
            acc.volume += log.volume.unwrap_or(0);
            acc.sets += u64::from(log.sets.unwrap_or(0));
            acc
        })
    }
}
