// Wake word listening: a dedicated thread pulls PCM frames from an audio
// source and feeds them to a detector. A hit fires the callback on its own
// thread (the loop never blocks on the handler) and then sleeps through a
// one second refractory window so one shout does not trigger twice.

use crate::error::{EngineError, EngineResult};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const REFRACTORY: Duration = Duration::from_secs(1);
const POLL_SLICE: Duration = Duration::from_millis(100);

pub trait WakeWordDetector: Send {
    /// Samples per frame expected by `process`.
    fn frame_length(&self) -> usize;

    /// Whether this frame contains the wake word.
    fn process(&mut self, frame: &[i16]) -> EngineResult<bool>;
}

pub trait AudioSource: Send {
    /// Blocking read of one frame of mono PCM.
    fn read_frame(&mut self, samples: usize) -> EngineResult<Vec<i16>>;
}

pub struct WakeWordListener {
    detector: Option<Box<dyn WakeWordDetector>>,
    source: Option<Box<dyn AudioSource>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl WakeWordListener {
    /// A listener whose detector failed to initialize is constructed with
    /// `None` and stays permanently stopped; `start` reports the failure.
    pub fn new(
        detector: Option<Box<dyn WakeWordDetector>>,
        source: Option<Box<dyn AudioSource>>,
    ) -> Self {
        WakeWordListener {
            detector,
            source,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Begin listening. `on_wake` is invoked on a throwaway thread for
    /// every detection. Consumes the detector and source, so a listener
    /// starts at most once: after `stop` it cannot be restarted, and a
    /// second `start` fails the same way a missing detector does. Build
    /// a fresh listener to listen again.
    pub fn start(
        &mut self,
        on_wake: impl Fn() + Send + Sync + 'static,
    ) -> EngineResult<()> {
        if self.is_running() {
            return Ok(());
        }
        let mut detector = self
            .detector
            .take()
            .ok_or_else(|| EngineError::Audio("wake-word detector unavailable".into()))?;
        let mut source = self
            .source
            .take()
            .ok_or_else(|| EngineError::Audio("audio source unavailable".into()))?;

        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);
        let on_wake = Arc::new(on_wake);

        let loop_running = Arc::clone(&running);
        self.handle = Some(std::thread::spawn(move || {
            while loop_running.load(Ordering::SeqCst) {
                let frame = match source.read_frame(detector.frame_length()) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("[wake] Audio read failed: {e}");
                        std::thread::sleep(POLL_SLICE);
                        continue;
                    }
                };
                match detector.process(&frame) {
                    Ok(true) => {
                        info!("[wake] Wake word detected");
                        let callback = Arc::clone(&on_wake);
                        std::thread::spawn(move || callback());
                        sleep_responsive(REFRACTORY, &loop_running);
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!("[wake] Detector error: {e}");
                        std::thread::sleep(POLL_SLICE);
                    }
                }
            }
        }));

        info!("[wake] Listening for wake word");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WakeWordListener {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleep `total` in short slices so `stop` is never held up long.
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
    use std::sync::atomic::AtomicUsize;

    struct ScriptedDetector {
        hits: Vec<bool>,
        cursor: usize,
    }

    impl WakeWordDetector for ScriptedDetector {
        fn frame_length(&self) -> usize {
            512
        }

        fn process(&mut self, frame: &[i16]) -> EngineResult<bool> {
            assert_eq!(frame.len(), 512);
            let hit = self.hits.get(self.cursor).copied().unwrap_or(false);
            self.cursor += 1;
            Ok(hit)
        }
    }

    struct SilenceSource;

    impl AudioSource for SilenceSource {
        fn read_frame(&mut self, samples: usize) -> EngineResult<Vec<i16>> {
            std::thread::sleep(Duration::from_millis(1));
            Ok(vec![0; samples])
        }
    }

    #[test]
    fn missing_detector_means_start_fails() {
        let mut listener = WakeWordListener::new(None, Some(Box::new(SilenceSource)));
        assert!(listener.start(|| {}).is_err());
        assert!(!listener.is_running());
    }

    #[test]
    fn stopped_listener_cannot_be_restarted() {
        let detector = ScriptedDetector {
            hits: vec![],
            cursor: 0,
        };
        let mut listener =
            WakeWordListener::new(Some(Box::new(detector)), Some(Box::new(SilenceSource)));
        listener.start(|| {}).unwrap();
        listener.stop();
        assert!(listener.start(|| {}).is_err());
        assert!(!listener.is_running());
    }

    #[test]
    fn detection_fires_callback_once_per_hit() {
        let detector = ScriptedDetector {
            hits: vec![false, true],
            cursor: 0,
        };
        let mut listener =
            WakeWordListener::new(Some(Box::new(detector)), Some(Box::new(SilenceSource)));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        listener
            .start(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert!(listener.is_running());

        // One hit in the script, then silence.
        std::thread::sleep(Duration::from_millis(100));
        listener.stop();
        assert!(!listener.is_running());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
