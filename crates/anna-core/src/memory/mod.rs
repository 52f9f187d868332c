// ── Memory store ───────────────────────────────────────────────────────────
// Durable assistant memory in SQLite via rusqlite.
//
// Module layout:
//   profile        — user profile key/value upsert + lookup
//   conversations  — append-only conversation log + search + pruning
//   notes          — note CRUD
//   stats          — daily counters + usage aggregation
//   reminders      — reminder rows consumed by the reminder poller
//
// Each public operation opens its own connection and is a single
// transaction. Nothing is shared across threads, so no locking is needed;
// the cost is one open/close per call, which is fine for a single-user
// assistant.

use crate::error::EngineResult;
use log::info;
use rusqlite::Connection;
use std::path::PathBuf;

mod conversations;
mod notes;
mod profile;
mod reminders;
mod schema;
mod stats;

pub use conversations::ConversationRecord;
pub use notes::Note;
pub use reminders::Reminder;
pub use stats::UsageStats;

/// Handle to the assistant's SQLite store. Cheap to clone — connections
/// are opened per operation, so clones never contend on a shared handle.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    db_path: PathBuf,
}

impl MemoryStore {
    /// Open (or create) the database at `db_path` and initialize tables.
    pub fn open(db_path: impl Into<PathBuf>) -> EngineResult<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = MemoryStore { db_path };
        let conn = store.connect()?;
        schema::run_migrations(&conn)?;

        info!("[memory] Store ready at {:?}", store.db_path);
        Ok(store)
    }

    pub(crate) fn connect(&self) -> EngineResult<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")
            .ok();
        Ok(conn)
    }
}

/// Fresh store in a unique temp file. The per-operation connection model
/// rules out `:memory:` databases for tests.
#[cfg(test)]
pub(crate) fn test_store() -> MemoryStore {
    use std::sync::atomic::{AtomicU64, Ordering};
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let path = std::env::temp_dir().join(format!(
        "anna-test-{}-{}.db",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_file(&path);
    MemoryStore::open(path).expect("test store")
}
