//! Guided workout session controller.
//!
//! One controller owns the HUD state of a single screen:
//!
//! ```text
//! Idle --start--> Active --finish--> Finished --reset--> Idle
//!                   |
//!                   +------abandon------> Idle
//! ```
//!
//! While `Active`, a once-per-second tick advances the session clock and the
//! rest countdown. Every transition is published to subscribed
//! [`HudObserver`]s so renderers never poll the controller.

use crate::config::{SessionSettings, StepperConfig};
use crate::{Error, Intensity, Result, Routine, RoutineExercise, WorkoutLog};
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Session
// ============================================================================

/// Runtime state of one in-progress workout
#[derive(Clone, Debug)]
pub struct Session<'r> {
    routine: &'r Routine,
    elapsed_seconds: u64,
    current_index: usize,
    completed_sets: HashMap<String, Vec<i32>>,
    volume: i64,
    rest_remaining: u32,
    resting: bool,
}

impl<'r> Session<'r> {
    fn new(routine: &'r Routine) -> Self {
        Self {
            routine,
            elapsed_seconds: 0,
            current_index: 0,
            completed_sets: HashMap::new(),
            volume: 0,
            rest_remaining: 0,
            resting: false,
        }
    }

    pub fn routine(&self) -> &'r Routine {
        self.routine
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_exercise(&self) -> &'r RoutineExercise {
        &self.routine.exercises[self.current_index]
    }

    pub fn is_last_exercise(&self) -> bool {
        self.current_index + 1 == self.routine.exercises.len()
    }

    /// Cumulative sum of weight x reps over every logged set
    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn rest_remaining(&self) -> u32 {
        self.rest_remaining
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    /// Rep counts logged for an exercise, in order
    pub fn sets_for(&self, exercise_id: &str) -> &[i32] {
        self.completed_sets
            .get(exercise_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of sets logged across all exercises
    pub fn total_sets(&self) -> usize {
        self.completed_sets.values().map(Vec::len).sum()
    }

    /// Progress of the exercise at `index`, if it exists
    pub fn progress(&self, index: usize) -> Option<ExerciseProgress<'r>> {
        let exercise = self.routine.exercises.get(index)?;
        Some(ExerciseProgress {
            index,
            exercise,
            completed: self.sets_for(&exercise.exercise_id).len(),
        })
    }

    pub fn current_progress(&self) -> ExerciseProgress<'r> {
        let exercise = self.current_exercise();
        ExerciseProgress {
            index: self.current_index,
            exercise,
            completed: self.sets_for(&exercise.exercise_id).len(),
        }
    }

    /// Advance the clock by one second. Returns true when a rest interval ended.
    fn tick(&mut self) -> bool {
        self.elapsed_seconds += 1;
        if !self.resting {
            return false;
        }
        if self.rest_remaining > 0 {
            self.rest_remaining -= 1;
        }
        if self.rest_remaining == 0 {
            self.resting = false;
            return true;
        }
        false
    }

    fn log_set(&mut self, weight: i32, reps: i32, rest_seconds: u32) {
        let exercise_id = self.current_exercise().exercise_id.clone();
        self.completed_sets.entry(exercise_id).or_default().push(reps);
        self.volume += i64::from(weight) * i64::from(reps);
        // A new rest always replaces the one in progress
        self.rest_remaining = rest_seconds;
        self.resting = true;
    }

    fn move_to(&mut self, index: usize) -> bool {
        let last = self.routine.exercises.len() - 1;
        let index = index.min(last);
        if index == self.current_index {
            return false;
        }
        self.current_index = index;
        self.resting = false;
        true
    }

    fn summarize(&self, date: NaiveDate, calories_per_minute: u32) -> WorkoutLog {
        let elapsed = self.elapsed_seconds;
        let duration_minutes = elapsed.div_ceil(60);
        let calories = elapsed * u64::from(calories_per_minute) / 60;

        WorkoutLog {
            id: Uuid::new_v4(),
            date,
            workout_type: self.routine.name.clone(),
            duration_minutes: u32::try_from(duration_minutes).unwrap_or(u32::MAX),
            calories_burned: u32::try_from(calories).unwrap_or(u32::MAX),
            avg_heart_rate: None,
            intensity: Some(Intensity::High),
            volume: Some(self.volume),
            sets: Some(u32::try_from(self.total_sets()).unwrap_or(u32::MAX)),
            reps: None,
        }
    }
}

/// Set completion for one exercise of the active routine
#[derive(Clone, Copy, Debug)]
pub struct ExerciseProgress<'r> {
    pub index: usize,
    pub exercise: &'r RoutineExercise,
    pub completed: usize,
}

impl ExerciseProgress<'_> {
    pub fn target_met(&self) -> bool {
        self.completed >= self.exercise.target_sets as usize
    }

    /// One flag per target slot; sets logged beyond the target are not shown
    pub fn slots(&self) -> Vec<bool> {
        (0..self.exercise.target_sets as usize)
            .map(|slot| slot < self.completed)
            .collect()
    }
}

// ============================================================================
// Set input stepper
// ============================================================================

/// Weight (kg) and reps for the next set.
///
/// Steppers are deliberately unbounded: values may go below zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetInput {
    pub weight: i32,
    pub reps: i32,
    weight_step: i32,
    reps_step: i32,
}

impl SetInput {
    pub fn new(config: &StepperConfig) -> Self {
        Self {
            weight: config.default_weight,
            reps: config.default_reps,
            weight_step: config.weight_step,
            reps_step: config.reps_step,
        }
    }

    pub fn increase_weight(&mut self) {
        self.weight += self.weight_step;
    }

    pub fn decrease_weight(&mut self) {
        self.weight -= self.weight_step;
    }

    pub fn increase_reps(&mut self) {
        self.reps += self.reps_step;
    }

    pub fn decrease_reps(&mut self) {
        self.reps -= self.reps_step;
    }
}

impl Default for SetInput {
    fn default() -> Self {
        Self::new(&StepperConfig::default())
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Notification published on every HUD transition
#[derive(Clone, Debug, PartialEq)]
pub enum HudEvent {
    Started {
        routine_id: String,
    },
    Ticked {
        elapsed_seconds: u64,
        rest_remaining: Option<u32>,
    },
    SetLogged {
        exercise_id: String,
        weight: i32,
        reps: i32,
        volume: i64,
    },
    RestEnded {
        skipped: bool,
    },
    RestExtended {
        remaining: u32,
    },
    ExerciseChanged {
        index: usize,
    },
    Finished(WorkoutLog),
    Abandoned,
    Reset,
}

/// Subscriber to HUD transitions (renderers, recorders)
pub trait HudObserver {
    fn on_event(&mut self, event: &HudEvent);
}

impl<F> HudObserver for F
where
    F: FnMut(&HudEvent),
{
    fn on_event(&mut self, event: &HudEvent) {
        self(event)
    }
}

/// Which screen the HUD is on
#[derive(Clone, Debug)]
pub enum HudState<'r> {
    /// Routine selection
    Idle,
    Active(Session<'r>),
    /// Summary of the record that was handed out
    Finished(WorkoutLog),
}

/// Owns the HUD state and applies user actions and ticks to it
pub struct SessionController<'r> {
    settings: SessionSettings,
    state: HudState<'r>,
    observers: Vec<Box<dyn HudObserver>>,
}

impl<'r> SessionController<'r> {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            state: HudState::Idle,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn HudObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &HudState<'r> {
        &self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The running session, if any
    pub fn session(&self) -> Option<&Session<'r>> {
        match &self.state {
            HudState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, HudState::Active(_))
    }

    fn emit(&mut self, event: HudEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn active_mut(&mut self, action: &str) -> Result<&mut Session<'r>> {
        match &mut self.state {
            HudState::Active(session) => Ok(session),
            HudState::Idle => Err(Error::State(format!(
                "cannot {} without an active session",
                action
            ))),
            HudState::Finished(_) => Err(Error::State(format!(
                "cannot {} after the session finished",
                action
            ))),
        }
    }

    /// Begin a session on `routine` (Idle -> Active)
    pub fn start(&mut self, routine: &'r Routine) -> Result<()> {
        if !matches!(self.state, HudState::Idle) {
            return Err(Error::State(
                "a session is already running or awaiting reset".into(),
            ));
        }
        if routine.exercises.is_empty() {
            return Err(Error::State(format!(
                "routine '{}' has no exercises",
                routine.id
            )));
        }

        tracing::info!("Starting routine {} ({})", routine.id, routine.name);
        self.state = HudState::Active(Session::new(routine));
        self.emit(HudEvent::Started {
            routine_id: routine.id.clone(),
        });
        Ok(())
    }

    /// One second of wall time. Ignored unless a session is active.
    pub fn tick(&mut self) {
        let HudState::Active(session) = &mut self.state else {
            return;
        };

        let rest_ended = session.tick();
        let elapsed_seconds = session.elapsed_seconds;
        let rest_remaining = session.resting.then_some(session.rest_remaining);

        self.emit(HudEvent::Ticked {
            elapsed_seconds,
            rest_remaining,
        });
        if rest_ended {
            tracing::debug!("Rest interval over at {}s", elapsed_seconds);
            self.emit(HudEvent::RestEnded { skipped: false });
        }
    }

    /// Record a set on the current exercise and start a rest interval
    pub fn log_set(&mut self, weight: i32, reps: i32) -> Result<()> {
        let rest_seconds = self.settings.rest_seconds;
        let session = self.active_mut("log a set")?;
        session.log_set(weight, reps, rest_seconds);

        let exercise_id = session.current_exercise().exercise_id.clone();
        let volume = session.volume;
        tracing::debug!(
            "Logged {} x {}kg on exercise {} (volume {})",
            reps,
            weight,
            exercise_id,
            volume
        );

        self.emit(HudEvent::SetLogged {
            exercise_id,
            weight,
            reps,
            volume,
        });
        Ok(())
    }

    /// Move to the next exercise. Returns false at the last exercise.
    pub fn next_exercise(&mut self) -> Result<bool> {
        let session = self.active_mut("change exercise")?;
        let target = session.current_index + 1;
        let moved = session.move_to(target);
        let index = session.current_index;
        if moved {
            self.emit(HudEvent::ExerciseChanged { index });
        }
        Ok(moved)
    }

    /// Move to the previous exercise. Returns false at the first exercise.
    pub fn prev_exercise(&mut self) -> Result<bool> {
        let session = self.active_mut("change exercise")?;
        let Some(target) = session.current_index.checked_sub(1) else {
            return Ok(false);
        };
        let moved = session.move_to(target);
        if moved {
            self.emit(HudEvent::ExerciseChanged { index: target });
        }
        Ok(moved)
    }

    /// End the rest interval now
    pub fn skip_rest(&mut self) -> Result<()> {
        let session = self.active_mut("skip rest")?;
        let was_resting = session.resting;
        session.resting = false;
        if was_resting {
            self.emit(HudEvent::RestEnded { skipped: true });
        }
        Ok(())
    }

    /// Add `seconds` to the rest countdown
    pub fn extend_rest(&mut self, seconds: u32) -> Result<()> {
        let session = self.active_mut("extend rest")?;
        session.rest_remaining = session.rest_remaining.saturating_add(seconds);
        let remaining = session.rest_remaining;
        self.emit(HudEvent::RestExtended { remaining });
        Ok(())
    }

    /// Extend rest by the configured amount
    pub fn extend_rest_default(&mut self) -> Result<()> {
        self.extend_rest(self.settings.extend_rest_seconds)
    }

    /// Close the session and hand out its log (Active -> Finished).
    ///
    /// The exercise position is not checked; finishing early is allowed.
    pub fn finish(&mut self, date: NaiveDate) -> Result<WorkoutLog> {
        let calories_per_minute = self.settings.calories_per_minute;
        let session = self.active_mut("finish")?;
        let log = session.summarize(date, calories_per_minute);

        tracing::info!(
            "Finished {}: {} min, {} sets, volume {}",
            log.workout_type,
            log.duration_minutes,
            log.sets.unwrap_or(0),
            log.volume.unwrap_or(0)
        );

        self.state = HudState::Finished(log.clone());
        self.emit(HudEvent::Finished(log.clone()));
        Ok(log)
    }

    /// Drop an active session without producing a log (Active -> Idle)
    pub fn abandon(&mut self) -> Result<()> {
        self.active_mut("abandon")?;
        tracing::info!("Session abandoned");
        self.state = HudState::Idle;
        self.emit(HudEvent::Abandoned);
        Ok(())
    }

    /// Return to routine selection (Finished -> Idle)
    pub fn reset(&mut self) -> Result<()> {
        if !matches!(self.state, HudState::Finished(_)) {
            return Err(Error::State("only a finished session can be reset".into()));
        }
        self.state = HudState::Idle;
        self.emit(HudEvent::Reset);
        Ok(())
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
