//! The data store façade: lifecycle, current-user scoping, and the
//! CRUD + range-query operations over the key-value store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use super::codec;
use super::error::{DataStoreError, DataStoreResult};
use super::keys;
use super::kv::KeyValueStore;
use crate::models::{FoodEntry, MacroGoals, NutritionData, User, UserPreferences};

/// Identity used when `connect` has to synthesize the first user.
pub const DEFAULT_USER_NAME: &str = "Default User";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";

/// Result of a lazy-default read: `created` is true when the record
/// was absent and the default was persisted by this call.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub created: bool,
}

#[derive(Default)]
struct Session {
    connected: bool,
    current_user: Option<User>,
}

/// The stateful façade over the key-value store.
///
/// Construct one instance per logical session and share it; there is
/// no hidden global. All goal, preference and entry operations are
/// scoped to the session's current user and fail with
/// [`DataStoreError::NotConnected`] outside a connected session.
///
/// Appends to a food entry partition are a read-modify-write of one
/// key; they are serialized through an in-process per-partition mutex
/// so concurrent appends to the same day cannot drop entries. Nothing
/// is serialized across processes.
pub struct DataStore {
    store: Arc<dyn KeyValueStore>,
    session: Mutex<Session>,
    partition_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl DataStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            session: Mutex::new(Session::default()),
            partition_locks: Mutex::new(HashMap::new()),
        }
    }

    // -- lifecycle --------------------------------------------------

    /// Brings the session up, synthesizing a default-identity user on
    /// first run. Returns the resolved current user.
    pub async fn connect(&self) -> DataStoreResult<User> {
        self.connect_with_identity(DEFAULT_USER_NAME, DEFAULT_USER_EMAIL)
            .await
    }

    /// Like [`connect`](Self::connect), with the identity to use if a
    /// first user has to be created.
    ///
    /// Either the session comes up fully (connected flag set, current
    /// user resolved) or it stays down; a failure leaves no partial
    /// session state.
    pub async fn connect_with_identity(&self, name: &str, email: &str) -> DataStoreResult<User> {
        match self.resolve_current_user(name, email).await {
            Ok(user) => {
                let mut session = self.lock_session();
                session.connected = true;
                session.current_user = Some(user.clone());
                debug!(user_id = %user.id, "data store connected");
                Ok(user)
            }
            Err(e @ DataStoreError::CorruptRecord { .. }) => Err(e),
            Err(e) => Err(DataStoreError::Connection(Box::new(e))),
        }
    }

    /// Clears the session. Persisted data is untouched. Safe to call
    /// repeatedly.
    pub fn disconnect(&self) {
        let mut session = self.lock_session();
        session.connected = false;
        session.current_user = None;
    }

    async fn resolve_current_user(&self, name: &str, email: &str) -> DataStoreResult<User> {
        let pointer_key = keys::current_user_key();
        if let Some(user) = self.read_record::<User>(&pointer_key).await? {
            return Ok(user);
        }

        let user = User::new(name, email);
        self.register_user(&user).await?;
        self.write_record(&pointer_key, &user).await?;
        self.write_record(&keys::macro_goals_key(&user.id), &MacroGoals::default())
            .await?;
        self.write_record(
            &keys::preferences_key(&user.id),
            &UserPreferences::default(),
        )
        .await?;
        info!(user_id = %user.id, "created first user");
        Ok(user)
    }

    // -- users ------------------------------------------------------

    /// The in-memory current user, if a session is up.
    pub fn current_user(&self) -> Option<User> {
        self.lock_session().current_user.clone()
    }

    /// The full registry in first-seen order. Empty if nothing was
    /// ever registered.
    pub async fn users(&self) -> DataStoreResult<Vec<User>> {
        Ok(self
            .read_record(&keys::users_key())
            .await?
            .unwrap_or_default())
    }

    /// Registers a new user without switching to them.
    pub async fn add_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> DataStoreResult<User> {
        let user = User::new(name, email);
        self.register_user(&user).await?;
        Ok(user)
    }

    /// Switches the session (and the persisted pointer) to a
    /// registered user.
    pub async fn set_current_user(&self, user_id: &str) -> DataStoreResult<User> {
        let users = self.users().await?;
        let user = users
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DataStoreError::UserNotFound(user_id.to_string()))?;

        self.write_record(&keys::current_user_key(), &user).await?;
        self.lock_session().current_user = Some(user.clone());
        Ok(user)
    }

    async fn register_user(&self, user: &User) -> DataStoreResult<()> {
        let key = keys::users_key();
        let mut users: Vec<User> = self.read_record(&key).await?.unwrap_or_default();
        if users.iter().any(|u| u.id == user.id) {
            return Ok(());
        }
        users.push(user.clone());
        self.write_record(&key, &users).await
    }

    // -- goals and preferences --------------------------------------

    /// Reads the current user's macro goals, persisting the defaults
    /// on first access.
    pub async fn load_macro_goals(&self) -> DataStoreResult<Loaded<MacroGoals>> {
        let user = self.require_current_user()?;
        self.load_or_seed(&keys::macro_goals_key(&user.id)).await
    }

    pub async fn get_macro_goals(&self) -> DataStoreResult<MacroGoals> {
        Ok(self.load_macro_goals().await?.value)
    }

    /// Overwrites the whole goals record. Merging with previous values
    /// is the caller's job.
    pub async fn save_macro_goals(&self, goals: &MacroGoals) -> DataStoreResult<()> {
        let user = self.require_current_user()?;
        self.write_record(&keys::macro_goals_key(&user.id), goals)
            .await
    }

    pub async fn load_user_preferences(&self) -> DataStoreResult<Loaded<UserPreferences>> {
        let user = self.require_current_user()?;
        self.load_or_seed(&keys::preferences_key(&user.id)).await
    }

    pub async fn get_user_preferences(&self) -> DataStoreResult<UserPreferences> {
        Ok(self.load_user_preferences().await?.value)
    }

    pub async fn save_user_preferences(&self, prefs: &UserPreferences) -> DataStoreResult<()> {
        let user = self.require_current_user()?;
        self.write_record(&keys::preferences_key(&user.id), prefs)
            .await
    }

    // -- food entries -----------------------------------------------

    /// Appends a new entry to its date partition and returns it.
    ///
    /// `at` defaults to now; the partition date is always derived from
    /// the effective timestamp.
    pub async fn save_food_entry(
        &self,
        data: NutritionData,
        at: Option<DateTime<Utc>>,
    ) -> DataStoreResult<FoodEntry> {
        let user = self.require_current_user()?;
        let entry = FoodEntry::log(data, at.unwrap_or_else(Utc::now));
        let key = keys::food_entries_key(&user.id, entry.date);

        let lock = self.partition_lock(&key);
        let _guard = lock.lock().await;

        let mut entries: Vec<FoodEntry> = self.read_record(&key).await?.unwrap_or_default();
        entries.push(entry.clone());
        self.write_record(&key, &entries).await?;
        debug!(key = %key, count = entries.len(), "appended food entry");
        Ok(entry)
    }

    /// The entries logged on one date, in insertion order.
    pub async fn food_entries_by_date(&self, date: NaiveDate) -> DataStoreResult<Vec<FoodEntry>> {
        let user = self.require_current_user()?;
        let key = keys::food_entries_key(&user.id, date);
        Ok(self.read_record(&key).await?.unwrap_or_default())
    }

    /// All entries in the closed date interval `[start, end]`, most
    /// recent first.
    pub async fn food_history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DataStoreResult<Vec<FoodEntry>> {
        let user = self.require_current_user()?;
        let all_keys = self.list_keys().await?;

        let start = keys::date_string(start);
        let end = keys::date_string(end);
        // YYYY-MM-DD sorts lexicographically in date order, so plain
        // string comparison suffices for the interval check.
        let mut matching: Vec<String> = all_keys
            .into_iter()
            .filter(|key| {
                keys::partition_date(key, &user.id)
                    .is_some_and(|date| date >= start.as_str() && date <= end.as_str())
            })
            .collect();
        matching.sort();

        let pairs = self
            .store
            .multi_get(&matching)
            .await
            .map_err(|e| DataStoreError::Store {
                op: "multi_get",
                key: format!("{}*", keys::food_entries_prefix(&user.id)),
                source: e,
            })?;

        let mut entries = Vec::new();
        for (key, raw) in pairs {
            if let Some(raw) = raw {
                let mut partition: Vec<FoodEntry> =
                    codec::decode(&raw).map_err(|e| DataStoreError::CorruptRecord {
                        key,
                        source: e,
                    })?;
                entries.append(&mut partition);
            }
        }
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    // -- reset ------------------------------------------------------

    /// Removes every key under the application namespace (all users,
    /// all entity kinds) and resets the session. For tests and full
    /// resets; not a user-facing operation.
    pub async fn clear_all(&self) -> DataStoreResult<()> {
        let all_keys = self.list_keys().await?;
        let prefix = keys::namespace_prefix();
        let doomed: Vec<String> = all_keys
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .collect();

        if !doomed.is_empty() {
            self.store
                .multi_remove(&doomed)
                .await
                .map_err(|e| DataStoreError::Store {
                    op: "multi_remove",
                    key: format!("{prefix}*"),
                    source: e,
                })?;
        }

        info!(removed = doomed.len(), "cleared all persisted data");
        *self.lock_session() = Session::default();
        self.partition_locks
            .lock()
            .expect("partition lock table poisoned")
            .clear();
        Ok(())
    }

    // -- internals --------------------------------------------------

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().expect("session lock poisoned")
    }

    fn require_current_user(&self) -> DataStoreResult<User> {
        let session = self.lock_session();
        if !session.connected {
            return Err(DataStoreError::NotConnected);
        }
        session
            .current_user
            .clone()
            .ok_or(DataStoreError::NoCurrentUser)
    }

    fn partition_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .partition_locks
            .lock()
            .expect("partition lock table poisoned");
        locks.entry(key.to_string()).or_default().clone()
    }

    async fn load_or_seed<T>(&self, key: &str) -> DataStoreResult<Loaded<T>>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        match self.read_record(key).await? {
            Some(value) => Ok(Loaded {
                value,
                created: false,
            }),
            None => {
                let value = T::default();
                self.write_record(key, &value).await?;
                Ok(Loaded {
                    value,
                    created: true,
                })
            }
        }
    }

    async fn read_record<T: DeserializeOwned>(&self, key: &str) -> DataStoreResult<Option<T>> {
        let raw = self
            .store
            .get(key)
            .await
            .map_err(|e| DataStoreError::Store {
                op: "get",
                key: key.to_string(),
                source: e,
            })?;
        match raw {
            None => Ok(None),
            Some(raw) => codec::decode(&raw)
                .map(Some)
                .map_err(|e| DataStoreError::CorruptRecord {
                    key: key.to_string(),
                    source: e,
                }),
        }
    }

    async fn write_record<T: Serialize>(&self, key: &str, value: &T) -> DataStoreResult<()> {
        let raw = codec::encode(value).map_err(|e| DataStoreError::SerializeRecord {
            key: key.to_string(),
            source: e,
        })?;
        self.store
            .set(key, &raw)
            .await
            .map_err(|e| DataStoreError::Store {
                op: "set",
                key: key.to_string(),
                source: e,
            })
    }

    async fn list_keys(&self) -> DataStoreResult<Vec<String>> {
        self.store
            .list_keys()
            .await
            .map_err(|e| DataStoreError::Store {
                op: "list_keys",
                key: keys::namespace_prefix(),
                source: e,
            })
    }
}
