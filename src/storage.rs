use rusqlite::{params, Connection, OptionalExtension};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::PortalResult;

pub const USER_KEY: &str = "jobportal_user";
pub const JOBS_KEY: &str = "jobportal_jobs";

/// String key/value persistence shaped like browser local storage.
pub trait Storage {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> PortalResult<()>;
    fn remove_item(&self, key: &str) -> PortalResult<()>;
}

pub struct SqliteStorage {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> PortalResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let storage = Self {
            conn,
            path: path.to_path_buf(),
        };
        storage.init()?;
        Ok(storage)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> PortalResult<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn,
            path: PathBuf::from(":memory:"),
        };
        storage.init()?;
        Ok(storage)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobportal") {
            proj_dirs.data_dir().join("jobportal.db")
        } else {
            PathBuf::from("jobportal.db")
        }
    }

    fn init(&self) -> PortalResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;
        Ok(())
    }

    pub fn keys(&self) -> PortalResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM local_storage ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Clears the persisted job collection so the next start reseeds it, and
/// optionally the session too.
pub fn reset<S: Storage>(storage: &S, include_session: bool) -> PortalResult<()> {
    storage.remove_item(JOBS_KEY)?;
    if include_session {
        storage.remove_item(USER_KEY)?;
    }
    Ok(())
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_storage_set_get_remove() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_item(JOBS_KEY).unwrap(), None);

        storage.set_item(JOBS_KEY, "[]").unwrap();
        assert_eq!(storage.get_item(JOBS_KEY).unwrap(), Some("[]".to_string()));

        // Second write replaces the value instead of adding a row
        storage.set_item(JOBS_KEY, "[1]").unwrap();
        assert_eq!(storage.get_item(JOBS_KEY).unwrap(), Some("[1]".to_string()));
        assert_eq!(storage.keys().unwrap(), vec![JOBS_KEY.to_string()]);

        storage.remove_item(JOBS_KEY).unwrap();
        assert_eq!(storage.get_item(JOBS_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_storage_remove_missing_key_is_ok() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(storage.remove_item(USER_KEY).is_ok());
    }

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set_item(USER_KEY, "{}").unwrap();
        assert_eq!(storage.get_item(USER_KEY).unwrap(), Some("{}".to_string()));
        storage.remove_item(USER_KEY).unwrap();
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_keeps_session_unless_asked() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.set_item(JOBS_KEY, "not json").unwrap();
        storage.set_item(USER_KEY, "{}").unwrap();

        reset(&storage, false).unwrap();
        assert_eq!(storage.get_item(JOBS_KEY).unwrap(), None);
        assert!(storage.get_item(USER_KEY).unwrap().is_some());

        reset(&storage, true).unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_default_path_ends_with_db_file() {
        let path = SqliteStorage::default_path();
        assert_eq!(path.file_name().unwrap(), "jobportal.db");
    }
}
