// A.N.N.A engine: Turkish voice-assistant core. Intent dispatch over an
// ordered trigger table, a moody personality layer, SQLite memory, queued
// speech output with echo suppression, wake word and reminder loops, and
// pluggable chat backends for free conversation.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod memory;
pub mod personality;
pub mod providers;
pub mod reminders;
pub mod services;
pub mod voice;

pub use config::Config;
pub use engine::{AiEngine, ServiceRegistry};
pub use error::{EngineError, EngineResult};
pub use memory::MemoryStore;
pub use personality::{Mood, Personality};
pub use reminders::ReminderPoller;
pub use voice::{VoiceEngine, WakeWordListener};
