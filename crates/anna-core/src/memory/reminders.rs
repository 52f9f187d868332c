// Reminder rows, consumed by the reminder poller.

use super::MemoryStore;
use crate::error::EngineResult;
use chrono::{DateTime, Local};
use rusqlite::params;

#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: i64,
    pub message: String,
    pub due_at: String,
}

impl MemoryStore {
    /// Schedule a reminder and return its id.
    pub fn add_reminder(&self, message: &str, due_at: DateTime<Local>) -> EngineResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO reminders (message, due_at) VALUES (?1, ?2)",
            params![message, due_at.format("%Y-%m-%d %H:%M:%S").to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Reminders that are due at `now` and not yet delivered, oldest first.
    pub fn due_reminders(&self, now: DateTime<Local>) -> EngineResult<Vec<Reminder>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, message, due_at FROM reminders
             WHERE notified = 0 AND due_at <= ?1
             ORDER BY due_at",
        )?;
        let reminders = stmt
            .query_map(
                params![now.format("%Y-%m-%d %H:%M:%S").to_string()],
                |row| {
                    Ok(Reminder {
                        id: row.get(0)?,
                        message: row.get(1)?,
                        due_at: row.get(2)?,
                    })
                },
            )?
            .filter_map(|r| r.ok())
            .collect();
        Ok(reminders)
    }

    /// Mark a reminder as delivered so the poller never fires it twice.
    pub fn mark_notified(&self, id: i64) -> EngineResult<()> {
        let conn = self.connect()?;
        conn.execute("UPDATE reminders SET notified = 1 WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::test_store;
    use chrono::{Duration, Local};

    #[test]
    fn past_reminders_are_due_once() {
        let store = test_store();
        let id = store
            .add_reminder("toplantı", Local::now() - Duration::minutes(5))
            .unwrap();
        store
            .add_reminder("gelecek", Local::now() + Duration::hours(1))
            .unwrap();

        let due = store.due_reminders(Local::now()).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "toplantı");

        store.mark_notified(id).unwrap();
        assert!(store.due_reminders(Local::now()).unwrap().is_empty());
    }
}
