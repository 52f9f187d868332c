// User profile: string key → string value, last write wins.

use super::MemoryStore;
use crate::error::EngineResult;
use log::debug;
use rusqlite::{params, OptionalExtension};

impl MemoryStore {
    /// Upsert a profile entry. Idempotent; last write wins.
    pub fn set_profile(&self, key: &str, value: &str) -> EngineResult<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO profile (key, value, updated_at)
             VALUES (?1, ?2, datetime('now','localtime'))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value],
        )?;
        debug!("[memory] Profile saved: {key}");
        Ok(())
    }

    pub fn get_profile(&self, key: &str) -> EngineResult<Option<String>> {
        let conn = self.connect()?;
        let value = conn
            .query_row(
                "SELECT value FROM profile WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// All profile entries, for export / inspection.
    pub fn all_profile(&self) -> EngineResult<Vec<(String, String)>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT key, value FROM profile ORDER BY key")?;
        let entries = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }
}
