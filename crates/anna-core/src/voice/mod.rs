// ── Voice adapter ──────────────────────────────────────────────────────────
// Speech output is a single FIFO queue drained by one worker thread, so
// replies play strictly in enqueue order. Speech input goes through the
// echo filters in `echo` before the engine ever sees it. The actual audio
// backends are injected behind the two capability traits; platforms
// without audio simply do not construct a `VoiceEngine`.

pub mod echo;
pub mod wake_word;

pub use wake_word::{AudioSource, WakeWordDetector, WakeWordListener};

use crate::error::EngineResult;
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Seconds the microphone stays cold after the assistant speaks.
const ECHO_COOLDOWN: Duration = Duration::from_secs(2);

pub trait TextToSpeech: Send + Sync {
    /// Synthesize and play `text`, returning when playback finishes.
    fn speak(&self, text: &str) -> EngineResult<()>;
}

pub trait SpeechToText: Send + Sync {
    /// Listen for up to `timeout` and return a transcription, or `None`
    /// when nothing intelligible was heard in time.
    fn listen(&self, timeout: Duration) -> EngineResult<Option<String>>;
}

#[derive(Default)]
struct LastSpoken {
    at: Option<Instant>,
    text: String,
}

pub struct VoiceEngine {
    sender: Option<mpsc::Sender<String>>,
    worker: Option<JoinHandle<()>>,
    pending: Arc<AtomicUsize>,
    last_spoken: Arc<Mutex<LastSpoken>>,
    stt: Option<Box<dyn SpeechToText>>,
}

impl VoiceEngine {
    pub fn new(tts: Box<dyn TextToSpeech>, stt: Option<Box<dyn SpeechToText>>) -> Self {
        let (sender, receiver) = mpsc::channel::<String>();
        let pending = Arc::new(AtomicUsize::new(0));
        let last_spoken = Arc::new(Mutex::new(LastSpoken::default()));

        let worker_pending = Arc::clone(&pending);
        let worker_last = Arc::clone(&last_spoken);
        let worker = std::thread::spawn(move || {
            // Channel disconnect ends the loop; anything already queued
            // still plays first.
            while let Ok(text) = receiver.recv() {
                // The identity filter needs the text before playback; the
                // cooldown runs from when playback finishes.
                worker_last.lock().text = text.clone();
                if let Err(e) = tts.speak(&text) {
                    warn!("[voice] Playback failed, falling back to text: {e}");
                    println!("🤖 {text}");
                }
                worker_last.lock().at = Some(Instant::now());
                worker_pending.fetch_sub(1, Ordering::SeqCst);
            }
        });

        info!("[voice] Voice engine ready");
        VoiceEngine {
            sender: Some(sender),
            worker: Some(worker),
            pending,
            last_spoken,
            stt,
        }
    }

    /// Queue `text` for playback. Returns immediately.
    pub fn speak(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if let Some(sender) = &self.sender {
            self.pending.fetch_add(1, Ordering::SeqCst);
            if sender.send(text.to_string()).is_err() {
                self.pending.fetch_sub(1, Ordering::SeqCst);
                warn!("[voice] Worker gone, dropping utterance");
            }
        }
    }

    /// Queued or currently playing speech.
    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Listen once. Waits out the echo cooldown, then filters the
    /// transcription; anything that looks like the assistant's own voice
    /// collapses to an empty string. Never fails: recognizer errors and
    /// timeouts also come back empty.
    pub fn listen(&self, timeout: Duration) -> String {
        let Some(stt) = &self.stt else {
            return String::new();
        };

        let since_spoke = self.last_spoken.lock().at.map(|at| at.elapsed());
        if let Some(elapsed) = since_spoke {
            if elapsed < ECHO_COOLDOWN {
                std::thread::sleep(ECHO_COOLDOWN - elapsed);
            }
        }

        match stt.listen(timeout) {
            Ok(Some(text)) => {
                let last = self.last_spoken.lock();
                if echo::is_self_echo(&text, Some(&last.text)) {
                    info!("[voice] Suppressed self echo: {text}");
                    String::new()
                } else {
                    text.to_lowercase()
                }
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!("[voice] Recognizer error: {e}");
                String::new()
            }
        }
    }

    /// Disconnect the queue and wait for the worker. Everything queued
    /// before the call still plays.
    pub fn stop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for VoiceEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
