use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A registered user of the tracker.
///
/// Users are never mutated after creation; the only deletion path is a
/// full store reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("Alice", "alice@example.com");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("A", "a@example.com");
        let b = User::new("A", "a@example.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_json_uses_camel_case() {
        let user = User::new("Alice", "alice@example.com");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"createdAt\""));

        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_user_display() {
        let user = User::new("Alice", "alice@example.com");
        let output = format!("{}", user);
        assert!(output.contains("Alice"));
        assert!(output.contains("alice@example.com"));
    }
}
