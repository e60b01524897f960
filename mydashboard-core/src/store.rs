//! Per-user dashboard configuration store.
//!
//! [`ConfigStore`] is the persistence seam used by the dashboard service:
//! find-by-user, append-only insert, delete-by-user. Two implementations:
//!
//! - [`FileConfigStore`] — one YAML document per user at
//!   `<home>/.mydashboard/users/<user>.yaml`, written atomically.
//! - [`MemoryConfigStore`] — process-local map, for embedding and tests.
//!
//! Records are returned in insertion order; sorting by `order` is the
//! service's job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, StoreError};
use crate::paths::{self, home};
use crate::types::{DashboardConfig, UserName};

// ---------------------------------------------------------------------------
// 1. Store abstraction
// ---------------------------------------------------------------------------

/// Persistence for dashboard configuration records.
pub trait ConfigStore: Send + Sync {
    /// All records stored for `user`, in insertion order. Empty if none.
    fn find_by_user(&self, user: &UserName) -> Result<Vec<DashboardConfig>, StoreError>;

    /// Append one record. Existing records are never updated in place.
    fn insert(&self, config: &DashboardConfig) -> Result<(), StoreError>;

    /// Remove every record stored for `user`. Absent users are a no-op.
    fn remove_by_user(&self, user: &UserName) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    fn find_by_user(&self, user: &UserName) -> Result<Vec<DashboardConfig>, StoreError> {
        (**self).find_by_user(user)
    }

    fn insert(&self, config: &DashboardConfig) -> Result<(), StoreError> {
        (**self).insert(config)
    }

    fn remove_by_user(&self, user: &UserName) -> Result<(), StoreError> {
        (**self).remove_by_user(user)
    }
}

// ---------------------------------------------------------------------------
// 2. File store
// ---------------------------------------------------------------------------

/// On-disk payload for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfigFile {
    pub user_name: UserName,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub records: Vec<DashboardConfig>,
}

/// Load the stored file for `user`, or `None` if the user has no file.
pub fn load_user_at(home: &Path, user: &UserName) -> Result<Option<UserConfigFile>, StoreError> {
    let path = paths::user_config_path_at(home, user)?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::Parse { path, source: e })
}

/// Atomically save the file for `file.user_name`.
pub fn save_user_at(home: &Path, file: &UserConfigFile) -> Result<(), StoreError> {
    let path = paths::user_config_path_at(home, &file.user_name)?;
    let yaml = serde_yaml::to_string(file)?;
    paths::write_atomic(&path, &yaml)
}

/// Delete the file for `user`. Returns whether a file was removed.
pub fn remove_user_at(home: &Path, user: &UserName) -> Result<bool, StoreError> {
    let path = paths::user_config_path_at(home, user)?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Names of every user with a stored configuration, sorted.
pub fn list_users_at(home: &Path) -> Result<Vec<UserName>, StoreError> {
    let dir = paths::users_dir_at(home);
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut users: Vec<UserName> = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.strip_suffix(".yaml").map(UserName::from)
        })
        .collect();
    users.sort();
    Ok(users)
}

/// [`ConfigStore`] backed by per-user YAML files under a home directory.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    home: PathBuf,
}

impl FileConfigStore {
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Store rooted at the current user's home directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::at(home()?))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

impl ConfigStore for FileConfigStore {
    fn find_by_user(&self, user: &UserName) -> Result<Vec<DashboardConfig>, StoreError> {
        let records = load_user_at(&self.home, user)?
            .map(|file| file.records)
            .unwrap_or_default();
        tracing::debug!(user = %user, count = records.len(), "loaded dashboard configuration");
        Ok(records)
    }

    fn insert(&self, config: &DashboardConfig) -> Result<(), StoreError> {
        let user = &config.user_name;
        let mut file = load_user_at(&self.home, user)?.unwrap_or_else(|| UserConfigFile {
            user_name: user.clone(),
            updated_at: Utc::now(),
            records: vec![],
        });
        file.records.push(config.clone());
        file.updated_at = Utc::now();
        save_user_at(&self.home, &file)
    }

    fn remove_by_user(&self, user: &UserName) -> Result<(), StoreError> {
        if remove_user_at(&self.home, user)? {
            tracing::debug!(user = %user, "removed dashboard configuration");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 3. In-memory store
// ---------------------------------------------------------------------------

/// Process-local [`ConfigStore`].
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    records: RwLock<HashMap<UserName, Vec<DashboardConfig>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn find_by_user(&self, user: &UserName) -> Result<Vec<DashboardConfig>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(user).cloned().unwrap_or_default())
    }

    fn insert(&self, config: &DashboardConfig) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records
            .entry(config.user_name.clone())
            .or_default()
            .push(config.clone());
        Ok(())
    }

    fn remove_by_user(&self, user: &UserName) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.remove(user);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn alice() -> UserName {
        UserName::from("alice")
    }

    #[test]
    fn file_store_unknown_user_is_empty() {
        let home = TempDir::new().expect("tempdir");
        let store = FileConfigStore::at(home.path());
        assert!(store.find_by_user(&alice()).expect("find").is_empty());
    }

    #[test]
    fn file_store_insert_appends_in_order() {
        let home = TempDir::new().expect("tempdir");
        let store = FileConfigStore::at(home.path());
        store.insert(&DashboardConfig::new("alice", "news", 2)).expect("insert");
        store.insert(&DashboardConfig::new("alice", "agenda", 1)).expect("insert");
        store.insert(&DashboardConfig::new("alice", "news", 2)).expect("insert");

        let records = store.find_by_user(&alice()).expect("find");
        let ids: Vec<_> = records.iter().map(|r| r.component_id.0.as_str()).collect();
        assert_eq!(ids, ["news", "agenda", "news"]);
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let home = TempDir::new().expect("tempdir");
        let store = FileConfigStore::at(home.path());
        store.insert(&DashboardConfig::new("alice", "news", 1)).expect("insert");
        store.remove_by_user(&alice()).expect("remove");
        store.remove_by_user(&alice()).expect("remove again");
        assert!(store.find_by_user(&alice()).expect("find").is_empty());
    }

    #[test]
    fn file_store_rejects_invalid_user() {
        let home = TempDir::new().expect("tempdir");
        let store = FileConfigStore::at(home.path());
        let err = store
            .insert(&DashboardConfig::new("../evil", "news", 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidUserName(_)));
    }

    #[test]
    fn list_users_is_sorted() {
        let home = TempDir::new().expect("tempdir");
        let store = FileConfigStore::at(home.path());
        store.insert(&DashboardConfig::new("carol", "news", 1)).expect("insert");
        store.insert(&DashboardConfig::new("alice", "news", 1)).expect("insert");
        let users = list_users_at(home.path()).expect("list");
        assert_eq!(users, [UserName::from("alice"), UserName::from("carol")]);
    }

    #[test]
    fn memory_store_keeps_users_separate() {
        let store = MemoryConfigStore::new();
        store.insert(&DashboardConfig::new("alice", "news", 1)).expect("insert");
        store.insert(&DashboardConfig::new("bob", "agenda", 1)).expect("insert");
        store.remove_by_user(&UserName::from("bob")).expect("remove");

        assert_eq!(store.find_by_user(&alice()).expect("find").len(), 1);
        assert!(store.find_by_user(&UserName::from("bob")).expect("find").is_empty());
    }
}
