// ── Reminder poller ────────────────────────────────────────────────────────
// Background loop over the store's reminders table. Every tick it fetches
// the due, undelivered rows, hands each to the notification callback, and
// marks it delivered so a reminder fires exactly once even across
// restarts.

use crate::error::EngineResult;
use crate::memory::{MemoryStore, Reminder};
use chrono::Local;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
const POLL_SLICE: Duration = Duration::from_millis(100);

pub struct ReminderPoller {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderPoller {
    pub fn start(
        store: MemoryStore,
        notify: impl Fn(&Reminder) + Send + 'static,
    ) -> Self {
        Self::start_with_interval(store, DEFAULT_INTERVAL, notify)
    }

    pub fn start_with_interval(
        store: MemoryStore,
        interval: Duration,
        notify: impl Fn(&Reminder) + Send + 'static,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let loop_running = Arc::clone(&running);

        let handle = std::thread::spawn(move || {
            while loop_running.load(Ordering::SeqCst) {
                if let Err(e) = deliver_due(&store, &notify) {
                    warn!("[reminders] Poll failed: {e}");
                }
                sleep_responsive(interval, &loop_running);
            }
        });

        info!("[reminders] Poller started ({}s interval)", interval.as_secs());
        ReminderPoller {
            running,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ReminderPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn deliver_due(store: &MemoryStore, notify: &impl Fn(&Reminder)) -> EngineResult<()> {
    for reminder in store.due_reminders(Local::now())? {
        notify(&reminder);
        store.mark_notified(reminder.id)?;
    }
    Ok(())
}

fn sleep_responsive(total: Duration, running: &AtomicBool) {
    let mut remaining = total;
    while !remaining.is_zero() && running.load(Ordering::SeqCst) {
        let slice = remaining.min(POLL_SLICE);
        std::thread::sleep(slice);
        remaining -= slice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::test_store;
    use chrono::Duration as ChronoDuration;
    use parking_lot::Mutex;

    #[test]
    fn due_reminder_is_delivered_exactly_once() {
        let store = test_store();
        store
            .add_reminder("ilacını al", Local::now() - ChronoDuration::minutes(1))
            .unwrap();

        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let mut poller = ReminderPoller::start_with_interval(
            store.clone(),
            Duration::from_millis(50),
            move |reminder| sink.lock().push(reminder.message.clone()),
        );

        // Several poll ticks pass; the reminder must not repeat.
        std::thread::sleep(Duration::from_millis(250));
        poller.stop();
        assert_eq!(*delivered.lock(), vec!["ilacını al"]);
    }

    #[test]
    fn future_reminders_stay_quiet() {
        let store = test_store();
        store
            .add_reminder("gelecek", Local::now() + ChronoDuration::hours(1))
            .unwrap();

        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let mut poller = ReminderPoller::start_with_interval(
            store.clone(),
            Duration::from_millis(50),
            move |reminder: &Reminder| sink.lock().push(reminder.message.clone()),
        );
        std::thread::sleep(Duration::from_millis(150));
        poller.stop();
        assert!(delivered.lock().is_empty());
    }
}
