use serde::{Deserialize, Serialize};

/// Per-user display preferences. Saved as a whole record, like goals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub use_grams: bool,
    pub dark_mode: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            use_grams: true,
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = UserPreferences::default();
        assert!(prefs.use_grams);
        assert!(!prefs.dark_mode);
    }

    #[test]
    fn test_preferences_json_uses_camel_case() {
        let prefs = UserPreferences {
            use_grams: false,
            dark_mode: true,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"useGrams\""));
        assert!(json.contains("\"darkMode\""));

        let parsed: UserPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, prefs);
    }
}
