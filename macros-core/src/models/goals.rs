use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily macro targets, one record per user.
///
/// Fields are stored as numeric strings, matching the persisted record
/// layout. Saves overwrite the whole record; merging with previous
/// values is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroGoals {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub sugar: String,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            protein: "150".to_string(),
            carbs: "300".to_string(),
            fats: "100".to_string(),
            sugar: "50".to_string(),
        }
    }
}

impl MacroGoals {
    pub fn new(
        protein: impl Into<String>,
        carbs: impl Into<String>,
        fats: impl Into<String>,
        sugar: impl Into<String>,
    ) -> Self {
        Self {
            protein: protein.into(),
            carbs: carbs.into(),
            fats: fats.into(),
            sugar: sugar.into(),
        }
    }

    fn grams(raw: &str) -> f64 {
        raw.trim().parse().unwrap_or(0.0)
    }

    pub fn protein_grams(&self) -> f64 {
        Self::grams(&self.protein)
    }

    pub fn carbs_grams(&self) -> f64 {
        Self::grams(&self.carbs)
    }

    pub fn fats_grams(&self) -> f64 {
        Self::grams(&self.fats)
    }

    pub fn sugar_grams(&self) -> f64 {
        Self::grams(&self.sugar)
    }

    /// Calorie target derived from the macro targets
    /// (4 kcal/g protein, 4 kcal/g carbs, 9 kcal/g fat).
    pub fn calorie_goal(&self) -> f64 {
        self.protein_grams() * 4.0 + self.carbs_grams() * 4.0 + self.fats_grams() * 9.0
    }
}

impl fmt::Display for MacroGoals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Protein: {} g", self.protein)?;
        writeln!(f, "Carbs:   {} g", self.carbs)?;
        writeln!(f, "Fats:    {} g", self.fats)?;
        writeln!(f, "Sugar:   {} g", self.sugar)?;
        write!(f, "Calories: {} kcal", self.calorie_goal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goals() {
        let goals = MacroGoals::default();
        assert_eq!(goals.protein, "150");
        assert_eq!(goals.carbs, "300");
        assert_eq!(goals.fats, "100");
        assert_eq!(goals.sugar, "50");
    }

    #[test]
    fn test_calorie_goal() {
        let goals = MacroGoals::default();
        // 150*4 + 300*4 + 100*9
        assert_eq!(goals.calorie_goal(), 2700.0);
    }

    #[test]
    fn test_grams_parsing_bad_value() {
        let goals = MacroGoals::new("abc", "300", "100", "50");
        assert_eq!(goals.protein_grams(), 0.0);
        assert_eq!(goals.carbs_grams(), 300.0);
    }

    #[test]
    fn test_goals_json_roundtrip() {
        let goals = MacroGoals::new("200", "250", "80", "40");
        let json = serde_json::to_string(&goals).unwrap();
        let parsed: MacroGoals = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, goals);
    }
}
