use serde::{Deserialize, Serialize};
use std::fmt;

/// The nutrition payload handed to the data layer when logging food.
///
/// Field names serialize in camelCase to match the persisted record
/// layout (`foodItem`, `servingSize`, `vitaminA`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionData {
    pub food_item: FoodItem,
}

impl NutritionData {
    pub fn new(food_item: FoodItem) -> Self {
        Self { food_item }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub serving_size: ServingSize,
    pub nutrition: Nutrition,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, serving_size: ServingSize, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            serving_size,
            nutrition,
        }
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}): {} kcal",
            self.name, self.serving_size.amount, self.serving_size.unit, self.nutrition.calories
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServingSize {
    pub amount: f64,
    pub unit: String,
}

impl ServingSize {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub calories: f64,
    pub macros: Macros,
    pub micronutrients: Micronutrients,
}

impl Nutrition {
    pub fn new(calories: f64, macros: Macros) -> Self {
        Self {
            calories,
            macros,
            micronutrients: Micronutrients::default(),
        }
    }

    pub fn with_micronutrients(mut self, micronutrients: Micronutrients) -> Self {
        self.micronutrients = micronutrients;
        self
    }
}

/// Macro breakdown in grams.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl Macros {
    pub fn new(protein: f64, carbohydrates: f64, fat: f64, fiber: f64) -> Self {
        Self {
            protein,
            carbohydrates,
            fat,
            fiber,
        }
    }
}

/// Micronutrient breakdown. Zero means not tracked for the entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Micronutrients {
    pub sodium: f64,
    pub potassium: f64,
    pub cholesterol: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub calcium: f64,
    pub iron: f64,
}
