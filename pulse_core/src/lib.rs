#![forbid(unsafe_code)]

//! Core domain model and business logic for IronPulse.
//!
//! This crate provides:
//! - Domain types (routines, workout and diet logs, user profile)
//! - The routine and meal catalog
//! - The guided workout session controller and its tick schedule
//! - Persistence (JSONL journal, CSV rollup, profile)
//! - History and dashboard metrics

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
pub mod clock;
pub mod journal;
pub mod rollup;
pub mod history;
pub mod profile;
pub mod metrics;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::{Config, DataPaths, SessionSettings, StepperConfig};
pub use session::{HudEvent, HudObserver, HudState, SessionController, SetInput};
pub use clock::Metronome;
pub use journal::{read_records, JsonlSink, Record, RecordSink};
pub use history::{load_recent_workouts, WorkoutSummary};
pub use metrics::NutritionTotals;
