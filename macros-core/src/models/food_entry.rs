use chrono::{DateTime, NaiveDate, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::nutrition::{FoodItem, NutritionData};

/// A logged food entry.
///
/// `id`, `timestamp` and `date` are fixed at creation time. The `date`
/// field is derived from the timestamp and acts as the partition key;
/// an entry never moves between partitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    pub food_item: FoodItem,
}

impl FoodEntry {
    /// Creates an entry logged at the given instant.
    pub fn log(data: NutritionData, at: DateTime<Utc>) -> Self {
        Self {
            id: generate_entry_id(at),
            timestamp: at,
            date: at.date_naive(),
            food_item: data.food_item,
        }
    }
}

impl fmt::Display for FoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.date, self.food_item)
    }
}

/// Entry ids are epoch millis plus a random alphanumeric suffix,
/// unique within the store.
fn generate_entry_id(at: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    format!("{}-{}", at.timestamp_millis(), suffix)
}
