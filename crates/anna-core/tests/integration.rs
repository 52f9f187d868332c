// End-to-end scenarios through the public API: one engine over a real
// SQLite file, mock audio capabilities, a canned chat backend. Single
// binary per the workspace test convention.

use anna_core::engine::{AiEngine, ServiceRegistry};
use anna_core::error::EngineResult;
use anna_core::memory::MemoryStore;
use anna_core::personality::{joke_pool, Personality};
use anna_core::providers::ChatProvider;
use anna_core::reminders::ReminderPoller;
use anna_core::services::FaceRecognizer;
use anna_core::voice::{SpeechToText, TextToSpeech, VoiceEngine};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Fixtures ───────────────────────────────────────────────────────────────

fn scratch_path(stem: &str, ext: &str) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    std::env::temp_dir().join(format!(
        "anna-it-{stem}-{}-{}.{ext}",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

struct CannedChat(&'static str);

#[async_trait]
impl ChatProvider for CannedChat {
    fn name(&self) -> &'static str {
        "canned"
    }
    async fn is_available(&self) -> bool {
        true
    }
    async fn complete(&self, _prompt: &str, _system: Option<&str>) -> EngineResult<String> {
        Ok(self.0.to_string())
    }
}

struct KnownFace(&'static str);

impl FaceRecognizer for KnownFace {
    fn register(&self, _name: &str) -> EngineResult<bool> {
        Ok(true)
    }
    fn recognize(&self) -> EngineResult<Option<String>> {
        Ok(Some(self.0.to_string()))
    }
}

fn engine_over(db: &PathBuf, services: ServiceRegistry) -> AiEngine {
    let memory = MemoryStore::open(db).unwrap();
    let user_name = memory
        .get_profile("user_name")
        .unwrap()
        .unwrap_or_else(|| "Efendim".to_string());
    let personality = Personality::new(scratch_path("sidecar", "json"), &user_name);
    AiEngine::new(
        personality,
        memory,
        services,
        Some(Box::new(CannedChat("canned cevap"))),
    )
}

// ── Conversation flow ──────────────────────────────────────────────────────

#[tokio::test]
async fn full_session_persists_across_engine_restarts() {
    let db = scratch_path("session", "db");
    let mut engine = engine_over(&db, ServiceRegistry::default());

    let reply = engine.respond("Benim adım Ali").await;
    assert!(reply.contains("Ali"), "{reply}");

    let reply = engine.respond("not al Pazartesi sunum hazırla").await;
    assert!(reply.starts_with("Not alındı"), "{reply}");

    // A fresh engine over the same database remembers everything.
    let mut engine = engine_over(&db, ServiceRegistry::default());
    assert_eq!(engine.user_name(), "Ali");

    let reply = engine.respond("geçmiş").await;
    assert!(reply.starts_with("Son konuştuklarımız:"), "{reply}");
    assert!(reply.contains("Benim adım Ali"), "{reply}");

    assert_eq!(engine.respond("adım ne").await, "Adın Ali, bunu nasıl unutursun?");

    let reply = engine.respond("notlarım").await;
    assert!(reply.contains("Pazartesi sunum hazırla"), "{reply}");
}

#[tokio::test]
async fn every_reply_appends_exactly_one_conversation_record() {
    let db = scratch_path("persist", "db");
    let mut engine = engine_over(&db, ServiceRegistry::default());

    engine.respond("merhaba nasılsın bugün").await;
    engine.respond("şaka yap").await;
    engine.respond("saat kaç").await;
    engine.respond("ben kimim").await; // unavailable capability still counts

    let store = MemoryStore::open(&db).unwrap();
    assert_eq!(store.usage_stats(7).unwrap().total_conversations, 4);
}

#[tokio::test]
async fn face_branch_wins_over_search_and_uses_injected_capability() {
    let db = scratch_path("face", "db");
    let mut engine = engine_over(
        &db,
        ServiceRegistry {
            face: Some(Box::new(KnownFace("Ali"))),
            ..ServiceRegistry::default()
        },
    );

    // Contains a search trigger too; the face rule must win.
    let reply = engine.respond("ben kimim, istersen internette ara").await;
    assert_eq!(reply, "Hoş geldiniz Ali!");
}

#[tokio::test]
async fn jokes_are_mood_agnostic_through_the_engine() {
    let db = scratch_path("joke", "db");
    let mut engine = engine_over(&db, ServiceRegistry::default());
    let pool = joke_pool("Efendim");

    for mood in ["professional", "playful", "sarcastic"] {
        engine.set_mood(mood);
        let reply = engine.respond("şaka yap").await;
        assert!(pool.contains(&reply), "{mood}: {reply}");
    }
}

#[tokio::test]
async fn mood_survives_restart_via_profile() {
    let db = scratch_path("mood", "db");
    let mut engine = engine_over(&db, ServiceRegistry::default());
    let reply = engine.respond("ruh halini sarcastic yap").await;
    assert_eq!(reply, "Ruh hali sarcastic olarak değiştirildi.");

    let store = MemoryStore::open(&db).unwrap();
    assert_eq!(store.get_profile("mood").unwrap().as_deref(), Some("sarcastic"));
}

// ── Voice pipeline ─────────────────────────────────────────────────────────

struct RecordingTts(Arc<Mutex<Vec<String>>>);

impl TextToSpeech for RecordingTts {
    fn speak(&self, text: &str) -> EngineResult<()> {
        self.0.lock().push(text.to_string());
        Ok(())
    }
}

struct ScriptedStt(Mutex<Vec<String>>);

impl SpeechToText for ScriptedStt {
    fn listen(&self, _timeout: Duration) -> EngineResult<Option<String>> {
        Ok(self.0.lock().pop())
    }
}

#[test]
fn spoken_replies_play_in_order_and_echo_is_suppressed() {
    let played = Arc::new(Mutex::new(Vec::new()));
    let stt = ScriptedStt(Mutex::new(vec![
        "yarın sabah dokuzda beni uyandırır mısın".to_string(),
        "Merhaba".to_string(),
    ]));
    let mut voice = VoiceEngine::new(
        Box::new(RecordingTts(Arc::clone(&played))),
        Some(Box::new(stt)),
    );

    voice.speak("Merhaba");
    voice.speak("Bugün hava güzel görünüyor");
    while voice.is_busy() {
        std::thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(*played.lock(), vec!["Merhaba", "Bugün hava güzel görünüyor"]);

    // Hearing its own greeting right after speaking comes back empty.
    assert_eq!(voice.listen(Duration::from_secs(1)), "");
    // The real command passes, lowercased.
    assert_eq!(
        voice.listen(Duration::from_secs(1)),
        "yarın sabah dokuzda beni uyandırır mısın"
    );
    voice.stop();
}

// ── Reminders ──────────────────────────────────────────────────────────────

#[test]
fn reminder_round_trip_from_store_to_notification() {
    let db = scratch_path("reminder", "db");
    let store = MemoryStore::open(&db).unwrap();
    store
        .add_reminder("toplantıya beş dakika", Local::now() - ChronoDuration::minutes(1))
        .unwrap();

    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    let mut poller = ReminderPoller::start_with_interval(
        store.clone(),
        Duration::from_millis(50),
        move |reminder| sink.lock().push(reminder.message.clone()),
    );
    std::thread::sleep(Duration::from_millis(250));
    poller.stop();

    assert_eq!(*delivered.lock(), vec!["toplantıya beş dakika"]);
    assert!(store.due_reminders(Local::now()).unwrap().is_empty());
}
