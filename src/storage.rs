// Client-side persistent key-value storage (SQLite)

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::{DashboardError, Result};
use crate::models::RecordId;

/// Key under which the hidden application ids are stored
pub const HIDDEN_IDS_KEY: &str = "hiddenApplicationIds";

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS dashboard_kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

/// Durable set of application ids the user chose to hide.
///
/// The whole set lives under a single key as a JSON array and is always
/// replaced wholesale.
pub struct HiddenIdStore {
    conn: Connection,
}

impl HiddenIdStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DashboardError::Storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            DashboardError::Storage(format!(
                "Failed to open SQLite database {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::with_connection(conn)
    }

    /// Store that lives only as long as the process
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self { conn })
    }

    /// Read the hidden ids. An absent key is an empty set.
    pub fn load_hidden_ids(&self) -> Result<Vec<RecordId>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM dashboard_kv WHERE key = ?",
                [HIDDEN_IDS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            None => Ok(Vec::new()),
            Some(json) => {
                let ids: Option<Vec<RecordId>> = serde_json::from_str(&json).map_err(|e| {
                    DashboardError::Storage(format!("Malformed {}: {}", HIDDEN_IDS_KEY, e))
                })?;
                // A stored JSON null counts as nothing hidden
                Ok(ids.unwrap_or_default())
            }
        }
    }

    /// Replace the stored set with `ids`
    pub fn save_hidden_ids(&self, ids: &[RecordId]) -> Result<()> {
        let json = serde_json::to_string(ids)
            .map_err(|e| DashboardError::Internal(anyhow::Error::new(e)))?;

        self.conn.execute(
            "INSERT INTO dashboard_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [HIDDEN_IDS_KEY, json.as_str()],
        )?;

        tracing::debug!(count = ids.len(), "Persisted hidden application ids");
        Ok(())
    }

    #[cfg(test)]
    fn put_raw(&self, value: &str) {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO dashboard_kv (key, value) VALUES (?1, ?2)",
                [HIDDEN_IDS_KEY, value],
            )
            .unwrap();
    }
}
