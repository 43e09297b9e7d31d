//! Macros Tracker Core Library
//!
//! Shared models and the local data layer for Macros Tracker applications.

pub mod models;
pub mod store;

pub use models::{
    DailyTotals, FoodEntry, FoodItem, MacroGoals, Macros, Micronutrients, Nutrition,
    NutritionData, ServingSize, User, UserPreferences,
};
pub use store::{
    DataStore, DataStoreError, DataStoreResult, FileStore, KeyValueStore, Loaded, MemoryStore,
    StoreError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
