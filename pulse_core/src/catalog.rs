//! Built-in routines and meal presets.
//!
//! Both catalogs are static reference data: built once, cached, never mutated.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Routines and meal presets, in display order
#[derive(Clone, Debug)]
pub struct Catalog {
    pub routines: Vec<Routine>,
    pub meals: Vec<MealPreset>,
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn exercise(id: &str, name: &str, target_sets: u32, target_reps: &str) -> RoutineExercise {
    RoutineExercise {
        exercise_id: id.into(),
        name: name.into(),
        target_sets,
        target_reps: target_reps.into(),
    }
}

fn meal(name: &str, calories: u32, protein: u32, carbs: u32, fat: u32) -> MealPreset {
    MealPreset {
        name: name.into(),
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Builds the default catalog
///
/// Prefer `get_default_catalog()` outside of tests.
pub fn build_default_catalog() -> Catalog {
    let routines = vec![
        Routine {
            id: "push_day".into(),
            name: "Push Power".into(),
            difficulty: Difficulty::Intermediate,
            estimated_minutes: 60,
            muscle_groups: vec![MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
            exercises: vec![
                exercise("1", "Barbell Bench Press", 4, "5-8"),
                exercise("2", "Overhead Press", 3, "8-10"),
                exercise("3", "Incline Dumbbell Press", 3, "10-12"),
                exercise("4", "Tricep Pushdowns", 3, "12-15"),
            ],
        },
        Routine {
            id: "pull_day".into(),
            name: "Back & Biceps".into(),
            difficulty: Difficulty::Intermediate,
            estimated_minutes: 55,
            muscle_groups: vec![MuscleGroup::Back, MuscleGroup::Arms],
            exercises: vec![
                exercise("5", "Deadlift", 3, "5"),
                exercise("6", "Pull Ups", 3, "AMRAP"),
                exercise("7", "Barbell Rows", 4, "8-10"),
                exercise("8", "Hammer Curls", 3, "12"),
            ],
        },
        Routine {
            id: "leg_day".into(),
            name: "Leg Destruction".into(),
            difficulty: Difficulty::Advanced,
            estimated_minutes: 70,
            muscle_groups: vec![MuscleGroup::Legs, MuscleGroup::Abs],
            exercises: vec![
                exercise("9", "Squat", 4, "5-8"),
                exercise("10", "Lunges", 3, "12"),
                exercise("11", "Leg Press", 3, "15-20"),
                exercise("12", "Plank", 3, "60s"),
            ],
        },
    ];

    let meals = vec![
        meal("Banana", 105, 1, 27, 0),
        meal("Protein Shake", 150, 25, 5, 2),
        meal("Chicken Breast", 165, 31, 0, 3),
        meal("Rice (1 cup)", 200, 4, 45, 0),
        meal("Greek Yogurt", 100, 10, 6, 0),
        meal("Avocado Toast", 250, 6, 20, 15),
    ];

    Catalog { routines, meals }
}

impl Catalog {
    /// Look up a routine by id
    pub fn routine(&self, id: &str) -> Result<&Routine> {
        self.routines
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("routine '{}'", id)))
    }

    /// Look up a meal preset by name, ignoring case
    pub fn meal(&self, name: &str) -> Result<&MealPreset> {
        self.meals
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::NotFound(format!("meal preset '{}'", name)))
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut routine_ids = HashSet::new();
        let mut exercise_ids = HashSet::new();

        if self.routines.is_empty() {
            errors.push("Catalog has no routines".to_string());
        }

        for routine in &self.routines {
            if routine.id.is_empty() {
                errors.push("Routine has empty ID".to_string());
            }
            if !routine_ids.insert(routine.id.as_str()) {
                errors.push(format!("Duplicate routine ID '{}'", routine.id));
            }
            if routine.name.is_empty() {
                errors.push(format!("Routine '{}' has empty name", routine.id));
            }
            if routine.exercises.is_empty() {
                errors.push(format!("Routine '{}' has no exercises", routine.id));
            }

            for ex in &routine.exercises {
                // Completed sets are keyed by exercise id, so ids must be unique catalog-wide
                if !exercise_ids.insert(ex.exercise_id.as_str()) {
                    errors.push(format!(
                        "Routine '{}': duplicate exercise ID '{}'",
                        routine.id, ex.exercise_id
                    ));
                }
                if ex.name.is_empty() {
                    errors.push(format!(
                        "Routine '{}': exercise '{}' has empty name",
                        routine.id, ex.exercise_id
                    ));
                }
                if ex.target_sets == 0 {
                    errors.push(format!(
                        "Routine '{}': exercise '{}' has zero target sets",
                        routine.id, ex.exercise_id
                    ));
                }
            }
        }

        for preset in &self.meals {
            if preset.name.is_empty() {
                errors.push("Meal preset has empty name".to_string());
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.routines.len(), 3);
        assert_eq!(catalog.meals.len(), 6);
    }

    #[test]
    fn test_every_routine_has_four_exercises() {
        let catalog = build_default_catalog();
        for routine in &catalog.routines {
            assert_eq!(routine.exercises.len(), 4, "routine {}", routine.id);
        }
    }

    #[test]
    fn test_routine_lookup() {
        let catalog = get_default_catalog();
        let push = catalog.routine("push_day").unwrap();
        assert_eq!(push.name, "Push Power");
        assert_eq!(push.total_target_sets(), 13);

        assert!(matches!(catalog.routine("arm_day"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_meal_lookup_ignores_case() {
        let catalog = get_default_catalog();
        let shake = catalog.meal("protein shake").unwrap();
        assert_eq!(shake.calories, 150);
        assert_eq!(shake.protein, 25);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_validate_reports_empty_routine() {
        let mut catalog = build_default_catalog();
        catalog.routines[0].exercises.clear();
        catalog.routines[1].exercises[0].target_sets = 0;

        let errors = catalog.validate();
        assert_eq!(errors.len(), 2, "{:?}", errors);
        assert!(errors[0].contains("no exercises"));
        assert!(errors[1].contains("zero target sets"));
    }
}
