// Usage statistics: daily counters plus an all-time peak-hour aggregate.

use super::MemoryStore;
use crate::error::EngineResult;
use chrono::{Duration, Local};
use rusqlite::{params, OptionalExtension};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageStats {
    /// All-time conversation count.
    pub total_conversations: i64,
    /// Sum of the daily counters over the last N calendar days, today
    /// inclusive.
    pub recent_count: i64,
    /// Hour of day (0–23) with the most conversations, all-time.
    /// Ties resolve to whichever group the aggregation returns first —
    /// arbitrary but stable within one SQLite build.
    pub peak_hour: Option<u32>,
}

impl MemoryStore {
    pub fn usage_stats(&self, days: u32) -> EngineResult<UsageStats> {
        let conn = self.connect()?;

        let total_conversations: i64 =
            conn.query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;

        // `days` calendar days inclusive of today: cutoff = today - (days-1).
        let cutoff = (Local::now().date_naive() - Duration::days(days.saturating_sub(1) as i64))
            .format("%Y-%m-%d")
            .to_string();
        let recent_count: i64 = conn.query_row(
            "SELECT COALESCE(SUM(conversation_count), 0) FROM stats WHERE date >= ?1",
            params![cutoff],
            |row| row.get(0),
        )?;

        let peak_hour: Option<u32> = conn
            .query_row(
                "SELECT CAST(strftime('%H', timestamp) AS INTEGER)
                 FROM conversations
                 GROUP BY strftime('%H', timestamp)
                 ORDER BY COUNT(*) DESC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(UsageStats {
            total_conversations,
            recent_count,
            peak_hour,
        })
    }
}
