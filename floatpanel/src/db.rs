use crate::errors::AppError;
use chrono::Local;
use egui_float_panel::{KeyValueStore, PanelError};
use rusqlite::{Connection, OptionalExtension, Result};
use std::fs;
use std::path::Path;

/// SQLite-backed key-value table holding persisted panel positions.
pub struct DbConn {
    db: Connection,
}

impl DbConn {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self::init(Connection::open(path)?)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS kv
                (
                    key            TEXT PRIMARY KEY,
                    value          TEXT NOT NULL,
                    update_time    INTEGER NOT NULL
                );",
            (),
        )?;
        Ok(Self { db })
    }

    pub fn find_value(&self, key: &str) -> Result<Option<String>> {
        self.db
            .query_row("SELECT value FROM kv WHERE key = ?1", (key,), |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn upsert_value(&self, key: &str, value: &str) -> Result<()> {
        let time = Local::now().timestamp_millis();
        self.db.execute(
            "INSERT INTO kv(key, value, update_time) VALUES (?1, ?2, ?3) \
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                                               update_time = excluded.update_time",
            (key, value, time),
        )?;
        Ok(())
    }

    pub fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        self.db.execute(
            "DELETE FROM kv WHERE substr(key, 1, length(?1)) = ?1",
            (prefix,),
        )
    }
}

impl KeyValueStore for DbConn {
    fn get(&self, key: &str) -> Result<Option<String>, PanelError> {
        self.find_value(key)
            .map_err(|err| PanelError::Box(Box::new(err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PanelError> {
        self.upsert_value(key, value)
            .map_err(|err| PanelError::Box(Box::new(err)))
    }
}
