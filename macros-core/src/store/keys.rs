//! The key namespace: deterministic mapping from (entity kind, user,
//! date) to store keys.
//!
//! Keys are stable across restarts and contain nothing random. Food
//! entry partitions for one user share a common prefix so a key scan
//! can find them, and the embedded `YYYY-MM-DD` component sorts
//! lexicographically in chronological order.

use chrono::NaiveDate;

/// Fixed application namespace. Every key the data layer writes
/// starts with this followed by `:`.
pub const NAMESPACE: &str = "macros";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `macros:users` — the user registry (JSON array, insertion order).
pub fn users_key() -> String {
    format!("{NAMESPACE}:users")
}

/// `macros:current-user` — the current-user pointer.
pub fn current_user_key() -> String {
    format!("{NAMESPACE}:current-user")
}

/// `macros:{userId}:macro-goals`
pub fn macro_goals_key(user_id: &str) -> String {
    format!("{NAMESPACE}:{user_id}:macro-goals")
}

/// `macros:{userId}:preferences`
pub fn preferences_key(user_id: &str) -> String {
    format!("{NAMESPACE}:{user_id}:preferences")
}

/// `macros:{userId}:food-entries:{YYYY-MM-DD}` — one partition per day.
pub fn food_entries_key(user_id: &str, date: NaiveDate) -> String {
    format!(
        "{}{}",
        food_entries_prefix(user_id),
        date.format(DATE_FORMAT)
    )
}

/// Common prefix of all food entry partitions for a user.
pub fn food_entries_prefix(user_id: &str) -> String {
    format!("{NAMESPACE}:{user_id}:food-entries:")
}

/// `macros:` — prefix owned by the application as a whole.
pub fn namespace_prefix() -> String {
    format!("{NAMESPACE}:")
}

/// Canonical date-string form used inside partition keys.
pub fn date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Extracts the date component of a food entry partition key for the
/// given user. Returns `None` if the key is something else or the
/// suffix is not a canonical `YYYY-MM-DD` date.
pub fn partition_date<'a>(key: &'a str, user_id: &str) -> Option<&'a str> {
    let date = key.strip_prefix(&food_entries_prefix(user_id))?;
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    // Canonical form only; "2024-3-1" parses but would break the
    // lexicographic interval check.
    if date_string(parsed) != date {
        return None;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_shapes() {
        assert_eq!(users_key(), "macros:users");
        assert_eq!(current_user_key(), "macros:current-user");
        assert_eq!(macro_goals_key("u1"), "macros:u1:macro-goals");
        assert_eq!(preferences_key("u1"), "macros:u1:preferences");
        assert_eq!(
            food_entries_key("u1", date(2024, 3, 1)),
            "macros:u1:food-entries:2024-03-01"
        );
    }

    #[test]
    fn test_distinct_triples_do_not_collide() {
        let keys = [
            users_key(),
            current_user_key(),
            macro_goals_key("u1"),
            macro_goals_key("u2"),
            preferences_key("u1"),
            food_entries_key("u1", date(2024, 3, 1)),
            food_entries_key("u1", date(2024, 3, 2)),
            food_entries_key("u2", date(2024, 3, 1)),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_partition_date_extraction() {
        let key = food_entries_key("u1", date(2024, 3, 1));
        assert_eq!(partition_date(&key, "u1"), Some("2024-03-01"));
        assert_eq!(partition_date(&key, "u2"), None);
        assert_eq!(partition_date(&macro_goals_key("u1"), "u1"), None);
    }

    #[test]
    fn test_partition_date_rejects_malformed_suffix() {
        assert_eq!(partition_date("macros:u1:food-entries:garbage", "u1"), None);
        assert_eq!(partition_date("macros:u1:food-entries:2024-3-1", "u1"), None);
        assert_eq!(
            partition_date("macros:u1:food-entries:2024-13-01", "u1"),
            None
        );
    }

    #[test]
    fn test_date_strings_sort_chronologically() {
        let earlier = date_string(date(2024, 3, 9));
        let later = date_string(date(2024, 11, 1));
        assert!(earlier < later);
    }
}
