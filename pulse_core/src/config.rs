//! Configuration file support for IronPulse.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ironpulse/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub stepper: StepperConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Guided session parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Rest interval started by every logged set
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,

    /// Seconds added by an extend-rest action
    #[serde(default = "default_extend_rest_seconds")]
    pub extend_rest_seconds: u32,

    #[serde(default = "default_calories_per_minute")]
    pub calories_per_minute: u32,

    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            rest_seconds: default_rest_seconds(),
            extend_rest_seconds: default_extend_rest_seconds(),
            calories_per_minute: default_calories_per_minute(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl SessionSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Starting values and increments of the weight/reps steppers
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepperConfig {
    #[serde(default = "default_weight")]
    pub default_weight: i32,

    #[serde(default = "default_reps")]
    pub default_reps: i32,

    #[serde(default = "default_weight_step")]
    pub weight_step: i32,

    #[serde(default = "default_reps_step")]
    pub reps_step: i32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            default_weight: default_weight(),
            default_reps: default_reps(),
            weight_step: default_weight_step(),
            reps_step: default_reps_step(),
        }
    }
}

/// File layout under the data directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    pub journal_dir: PathBuf,
    pub workouts_journal: PathBuf,
    pub meals_journal: PathBuf,
    pub workouts_csv: PathBuf,
    pub profile: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: &Path) -> Self {
        let journal_dir = data_dir.join("journal");
        Self {
            workouts_journal: journal_dir.join("workouts.jsonl"),
            meals_journal: journal_dir.join("meals.jsonl"),
            workouts_csv: data_dir.join("workouts.csv"),
            profile: data_dir.join("profile.json"),
            journal_dir,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("ironpulse")
}

fn default_rest_seconds() -> u32 {
    60
}

fn default_extend_rest_seconds() -> u32 {
    30
}

fn default_calories_per_minute() -> u32 {
    8
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_weight() -> i32 {
    60
}

fn default_reps() -> i32 {
    10
}

fn default_weight_step() -> i32 {
    5
}

fn default_reps_step() -> i32 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject settings that would stall the session clock
    pub fn validate(&self) -> Result<()> {
        if self.session.tick_millis == 0 {
            return Err(Error::Config("session.tick_millis must be positive".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("ironpulse").join("config.toml")
    }
}
