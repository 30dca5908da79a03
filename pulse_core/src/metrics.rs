//! Dashboard numbers derived from the profile and the diet log.

use crate::{DietLog, Gender, UserProfile};
use chrono::NaiveDate;

/// Activity multiplier for a moderately active user
const MODERATE_ACTIVITY: f64 = 1.55;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor), floored
pub fn bmr(profile: &UserProfile) -> i32 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    let adjusted = match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    adjusted.floor() as i32
}

/// Total daily energy expenditure, floored
pub fn tdee(profile: &UserProfile) -> i32 {
    (f64::from(bmr(profile)) * MODERATE_ACTIVITY).floor() as i32
}

/// Body mass index. Returns 0 for a non-positive height.
pub fn bmi(profile: &UserProfile) -> f64 {
    if profile.height <= 0.0 {
        return 0.0;
    }
    let meters = profile.height / 100.0;
    profile.weight / (meters * meters)
}

/// Summed intake for one day
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NutritionTotals {
    pub meals: usize,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

impl NutritionTotals {
    pub fn for_date(logs: &[DietLog], date: NaiveDate) -> Self {
        logs.iter()
            .filter(|log| log.date == date)
            .fold(Self::default(), |mut acc, log| {
                acc.meals += 1;
                acc.calories = acc.calories.saturating_add(log.calories);
                acc.protein = acc.protein.saturating_add(log.protein);
                acc.carbs = acc.carbs.saturating_add(log.carbs);
                acc.fat = acc.fat.saturating_add(log.fat);
                acc.fiber = acc.fiber.saturating_add(log.fiber.unwrap_or(0));
                acc
            })
    }

    /// Percent of the profile's daily calorie target, capped at 100
    pub fn calorie_progress(&self, profile: &UserProfile) -> u32 {
        percent_of(self.calories, profile.targets.daily_calories)
    }

    pub fn protein_progress(&self, profile: &UserProfile) -> u32 {
        percent_of(self.protein, profile.targets.daily_protein)
    }
}

fn percent_of(value: u32, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    let pct = u64::from(value) * 100 / u64::from(target);
    pct.min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn meal(date: NaiveDate, calories: u32, protein: u32, fiber: Option<u32>) -> DietLog {
        DietLog {
            id: Uuid::new_v4(),
            date,
            meal: "Test".into(),
            calories,
            protein,
            carbs: 10,
            fat: 5,
            fiber,
        }
    }

    #[test]
    fn test_default_profile_energy() {
        let profile = UserProfile::default();
        // 780 + 1125 - 140 + 5
        assert_eq!(bmr(&profile), 1770);
        assert_eq!(tdee(&profile), 2743);
        assert!((bmi(&profile) - 24.07).abs() < 0.01);
    }

    #[test]
    fn test_female_bmr() {
        let mut profile = UserProfile::default();
        profile.gender = Gender::Female;
        assert_eq!(bmr(&profile), 1604);
    }

    #[test]
    fn test_totals_only_count_the_day() {
        let logs = vec![
            meal(day(9), 150, 25, Some(3)),
            meal(day(9), 165, 31, None),
            meal(day(8), 900, 50, Some(10)),
        ];

        let totals = NutritionTotals::for_date(&logs, day(9));
        assert_eq!(totals.meals, 2);
        assert_eq!(totals.calories, 315);
        assert_eq!(totals.protein, 56);
        assert_eq!(totals.carbs, 20);
        assert_eq!(totals.fiber, 3);
    }

    #[test]
    fn test_totals_saturate_on_huge_meals() {
        let logs = vec![
            meal(day(9), u32::MAX, u32::MAX, Some(u32::MAX)),
            meal(day(9), u32::MAX, 1, Some(1)),
        ];

        let totals = NutritionTotals::for_date(&logs, day(9));
        assert_eq!(totals.meals, 2);
        assert_eq!(totals.calories, u32::MAX);
        assert_eq!(totals.protein, u32::MAX);
        assert_eq!(totals.fiber, u32::MAX);
        assert_eq!(totals.calorie_progress(&UserProfile::default()), 100);
    }

    #[test]
    fn test_progress_is_capped() {
        let profile = UserProfile::default();
        let totals = NutritionTotals {
            calories: 1400,
            protein: 400,
            ..Default::default()
        };
        assert_eq!(totals.calorie_progress(&profile), 50);
        assert_eq!(totals.protein_progress(&profile), 100);
    }
}
