mod food_entry;
mod goals;
mod nutrition;
mod preferences;
mod totals;
mod user;

pub use food_entry::FoodEntry;
pub use goals::MacroGoals;
pub use nutrition::{FoodItem, Macros, Micronutrients, Nutrition, NutritionData, ServingSize};
pub use preferences::UserPreferences;
pub use totals::DailyTotals;
pub use user::User;
