// Conversation log: append-only, newest first on retrieval.

use super::MemoryStore;
use crate::error::EngineResult;
use chrono::{Duration, Local};
use rusqlite::params;

/// One immutable conversation turn.
#[derive(Debug, Clone)]
pub struct ConversationRecord {
    pub timestamp: String,
    pub user_input: String,
    pub assistant_response: String,
    pub mood: String,
}

impl ConversationRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(ConversationRecord {
            timestamp: row.get(0)?,
            user_input: row.get(1)?,
            assistant_response: row.get(2)?,
            mood: row.get(3)?,
        })
    }
}

impl MemoryStore {
    /// Append one conversation turn and bump today's counter, atomically.
    /// The mood is stored as given — validation lives with the personality,
    /// not the store.
    pub fn add_conversation(
        &self,
        user_input: &str,
        assistant_response: &str,
        mood: &str,
    ) -> EngineResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO conversations (user_input, assistant_response, mood)
             VALUES (?1, ?2, ?3)",
            params![user_input, assistant_response, mood],
        )?;
        let today = Local::now().format("%Y-%m-%d").to_string();
        tx.execute(
            "INSERT INTO stats (date, conversation_count) VALUES (?1, 1)
             ON CONFLICT(date) DO UPDATE SET
                conversation_count = conversation_count + 1",
            params![today],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Most recent conversations, newest first.
    pub fn recent_conversations(&self, limit: usize) -> EngineResult<Vec<ConversationRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT timestamp, user_input, assistant_response, mood
             FROM conversations ORDER BY id DESC LIMIT ?1",
        )?;
        let records = stmt
            .query_map(params![limit as i64], ConversationRecord::from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    /// Keyword search over both sides of the dialogue, newest first,
    /// capped at 20 results.
    pub fn search_conversations(&self, keyword: &str) -> EngineResult<Vec<ConversationRecord>> {
        let conn = self.connect()?;
        let pattern = format!("%{keyword}%");
        let mut stmt = conn.prepare(
            "SELECT timestamp, user_input, assistant_response, mood
             FROM conversations
             WHERE user_input LIKE ?1 OR assistant_response LIKE ?1
             ORDER BY id DESC LIMIT 20",
        )?;
        let records = stmt
            .query_map(params![pattern], ConversationRecord::from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    /// Delete conversations older than `days`, or everything when `None`.
    /// Returns the number of rows deleted.
    pub fn clear_history(&self, days: Option<u32>) -> EngineResult<usize> {
        let conn = self.connect()?;
        let deleted = match days {
            Some(days) => {
                let cutoff = (Local::now() - Duration::days(days as i64))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();
                conn.execute(
                    "DELETE FROM conversations WHERE timestamp < ?1",
                    params![cutoff],
                )?
            }
            None => conn.execute("DELETE FROM conversations", [])?,
        };
        log::info!("[memory] Cleared {deleted} conversations");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::test_store;

    #[test]
    fn retrieval_is_newest_first() {
        let store = test_store();
        store.add_conversation("ilk", "bir", "professional").unwrap();
        store.add_conversation("ikinci", "iki", "professional").unwrap();
        store.add_conversation("üçüncü", "üç", "playful").unwrap();

        let recent = store.recent_conversations(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user_input, "üçüncü");
        assert_eq!(recent[1].user_input, "ikinci");
    }

    #[test]
    fn search_matches_either_side() {
        let store = test_store();
        store.add_conversation("hava nasıl", "güneşli", "professional").unwrap();
        store.add_conversation("selam", "bugün yağmurlu", "professional").unwrap();

        let hits = store.search_conversations("yağmur").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].user_input, "selam");
    }

    #[test]
    fn search_is_capped_at_twenty() {
        let store = test_store();
        for i in 0..25 {
            store
                .add_conversation(&format!("soru {i}"), "cevap", "professional")
                .unwrap();
        }
        assert_eq!(store.search_conversations("soru").unwrap().len(), 20);
    }

    #[test]
    fn bad_mood_values_are_stored_verbatim() {
        let store = test_store();
        store.add_conversation("merhaba", "selam", "not-a-mood").unwrap();
        assert_eq!(store.recent_conversations(1).unwrap()[0].mood, "not-a-mood");
    }

    #[test]
    fn clear_history_without_cutoff_deletes_all() {
        let store = test_store();
        store.add_conversation("a", "b", "professional").unwrap();
        store.add_conversation("c", "d", "professional").unwrap();
        assert_eq!(store.clear_history(None).unwrap(), 2);
        assert!(store.recent_conversations(10).unwrap().is_empty());
    }
}
