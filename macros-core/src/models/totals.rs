use serde::{Deserialize, Serialize};
use std::fmt;

use super::food_entry::FoodEntry;

/// Aggregated nutrition for one day of entries.
///
/// Sugar is not tracked per entry, so the folded value stays zero; the
/// field exists so totals line up with [`MacroGoals`](super::MacroGoals).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sugar: f64,
    pub calories: f64,
}

impl DailyTotals {
    pub fn from_entries(entries: &[FoodEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, entry| {
            let nutrition = &entry.food_item.nutrition;
            Self {
                protein: acc.protein + nutrition.macros.protein,
                carbs: acc.carbs + nutrition.macros.carbohydrates,
                fats: acc.fats + nutrition.macros.fat,
                sugar: acc.sugar,
                calories: acc.calories + nutrition.calories,
            }
        })
    }
}

impl fmt::Display for DailyTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal (protein {} g, carbs {} g, fats {} g)",
            self.calories, self.protein, self.carbs, self.fats
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::nutrition::{FoodItem, Macros, Nutrition, NutritionData, ServingSize};
    use chrono::Utc;

    fn entry(calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodEntry {
        FoodEntry::log(
            NutritionData::new(FoodItem::new(
                "Test",
                ServingSize::new(1.0, "serving"),
                Nutrition::new(calories, Macros::new(protein, carbs, fat, 0.0)),
            )),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_totals() {
        let totals = DailyTotals::from_entries(&[]);
        assert_eq!(totals, DailyTotals::default());
    }

    #[test]
    fn test_totals_fold() {
        let entries = vec![
            entry(100.0, 10.0, 20.0, 5.0),
            entry(200.0, 15.0, 30.0, 10.0),
        ];
        let totals = DailyTotals::from_entries(&entries);

        assert_eq!(totals.calories, 300.0);
        assert_eq!(totals.protein, 25.0);
        assert_eq!(totals.carbs, 50.0);
        assert_eq!(totals.fats, 15.0);
        assert_eq!(totals.sugar, 0.0);
    }
}
