// Notes: mutable records with monotonic integer ids.

use super::MemoryStore;
use crate::error::EngineResult;
use log::info;
use rusqlite::params;

#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub timestamp: String,
    pub title: String,
    pub content: String,
    pub category: String,
}

impl Note {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Note {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            category: row.get(4)?,
        })
    }
}

impl MemoryStore {
    /// Insert a note and return its assigned id.
    pub fn add_note(&self, title: &str, content: &str, category: Option<&str>) -> EngineResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO notes (title, content, category) VALUES (?1, ?2, ?3)",
            params![title, content, category.unwrap_or("general")],
        )?;
        let id = conn.last_insert_rowid();
        info!("[memory] Note added: {title} (id {id})");
        Ok(id)
    }

    /// Notes, newest first, optionally filtered by category.
    pub fn get_notes(&self, category: Option<&str>) -> EngineResult<Vec<Note>> {
        let conn = self.connect()?;
        let notes = match category {
            Some(category) => {
                let mut stmt = conn.prepare(
                    "SELECT id, timestamp, title, content, category FROM notes
                     WHERE category = ?1 ORDER BY id DESC",
                )?;
                let rows = stmt.query_map(params![category], Note::from_row)?;
                rows.filter_map(|r| r.ok()).collect()
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, timestamp, title, content, category FROM notes
                     ORDER BY id DESC",
                )?;
                let rows = stmt.query_map([], Note::from_row)?;
                rows.filter_map(|r| r.ok()).collect()
            }
        };
        Ok(notes)
    }

    /// Delete a note by id. Returns whether a row was removed.
    pub fn delete_note(&self, id: i64) -> EngineResult<bool> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::test_store;

    #[test]
    fn ids_are_monotonic_and_newest_first() {
        let store = test_store();
        let first = store.add_note("a", "ekmek al", None).unwrap();
        let second = store.add_note("b", "süt al", None).unwrap();
        assert!(second > first);

        let notes = store.get_notes(None).unwrap();
        assert_eq!(notes[0].id, second);
        assert_eq!(notes[0].content, "süt al");
    }

    #[test]
    fn category_defaults_to_general_and_filters() {
        let store = test_store();
        store.add_note("a", "x", None).unwrap();
        store.add_note("b", "y", Some("iş")).unwrap();

        let general = store.get_notes(Some("general")).unwrap();
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].title, "a");

        let work = store.get_notes(Some("iş")).unwrap();
        assert_eq!(work.len(), 1);
    }

    #[test]
    fn delete_by_id() {
        let store = test_store();
        let id = store.add_note("a", "x", None).unwrap();
        assert!(store.delete_note(id).unwrap());
        assert!(!store.delete_note(id).unwrap());
        assert!(store.get_notes(None).unwrap().is_empty());
    }
}
