//! Core domain types for IronPulse.
//!
//! This module defines the fundamental types used throughout the system:
//! - Routines and their exercises (static reference data)
//! - Finished workout and diet records
//! - The user profile and its targets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Routine Types
// ============================================================================

/// Difficulty tier of a routine
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// Muscle groups a routine targets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Abs,
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Abs => "Abs",
        };
        f.write_str(label)
    }
}

/// One exercise slot within a routine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineExercise {
    pub exercise_id: String,
    pub name: String,
    pub target_sets: u32,
    /// Free-form target such as "8-12", "AMRAP" or "60s"
    pub target_reps: String,
}

/// A pre-authored workout template
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub estimated_minutes: u32,
    pub muscle_groups: Vec<MuscleGroup>,
    pub exercises: Vec<RoutineExercise>,
}

impl Routine {
    /// Sum of target sets over every exercise
    pub fn total_target_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.target_sets).sum()
    }
}

// ============================================================================
// Record Types
// ============================================================================

/// Intensity label attached to a workout log
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intensity {
    Low,
    Moderate,
    High,
    Peak,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
            Intensity::Peak => "Peak",
        };
        f.write_str(label)
    }
}

/// A finished workout, written once and never mutated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Routine name (or activity type for logs from other sources)
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub calories_burned: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Total weight lifted (sum of weight x reps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
}

/// A logged meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DietLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal: String,
    pub calories: u32,
    /// grams
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<u32>,
}

/// A one-tap meal shortcut
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealPreset {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl MealPreset {
    /// Turn the preset into a diet log for the given day
    pub fn to_log(&self, date: NaiveDate) -> DietLog {
        DietLog {
            id: Uuid::new_v4(),
            date,
            meal: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: None,
        }
    }
}

// ============================================================================
// Profile Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    Maintain,
    Endurance,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Body measurements, all in centimetres except body fat (%)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyComposition {
    pub body_fat: f64,
    pub waist: f64,
    pub chest: f64,
    pub arms: f64,
    pub thighs: f64,
}

/// Daily and weekly goals
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Targets {
    pub weight: f64,
    pub weekly_workouts: u32,
    pub daily_calories: u32,
    pub daily_protein: u32,
    pub daily_carbs: u32,
    pub daily_fat: u32,
    pub daily_fiber: u32,
    pub daily_steps: u32,
}

/// The locally persisted user profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    pub goal: FitnessGoal,
    pub level: TrainingLevel,
    pub body: BodyComposition,
    pub targets: Targets,
    pub credits: u32,
    pub earnings: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Alex Fitness".into(),
            age: 28,
            gender: Gender::Male,
            weight: 78.0,
            height: 180.0,
            goal: FitnessGoal::GainMuscle,
            level: TrainingLevel::Intermediate,
            body: BodyComposition {
                body_fat: 15.0,
                waist: 82.0,
                chest: 105.0,
                arms: 38.0,
                thighs: 58.0,
            },
            targets: Targets {
                weight: 82.0,
                weekly_workouts: 5,
                daily_calories: 2800,
                daily_protein: 180,
                daily_carbs: 300,
                daily_fat: 80,
                daily_fiber: 35,
                daily_steps: 10000,
            },
            credits: 500,
            earnings: 1250,
        }
    }
}
