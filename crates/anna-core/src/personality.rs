// ── Personality ────────────────────────────────────────────────────────────
// The assistant's mood, phrase pools, and emotional reactions, plus a small
// JSON sidecar for free-form key/value memory. Phrase selection is uniform
// random; templates carry a `{name}` placeholder for the user's display name.

use crate::error::EngineResult;
use chrono::{Local, Timelike};
use log::{info, warn};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

// ── Mood ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Professional,
    Playful,
    Sarcastic,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Professional => "professional",
            Mood::Playful => "playful",
            Mood::Sarcastic => "sarcastic",
        }
    }

    pub fn parse(s: &str) -> Option<Mood> {
        match s.trim() {
            "professional" => Some(Mood::Professional),
            "playful" => Some(Mood::Playful),
            "sarcastic" => Some(Mood::Sarcastic),
            _ => None,
        }
    }

    /// System instruction handed to the chat backend for free conversation.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Mood::Professional => {
                "Profesyonel ve yardımsever bir asistansın. Kısa ve öz cevaplar ver."
            }
            Mood::Playful => "Esprili ve samimi bir asistansın. Biraz şakacı olabilirsin.",
            Mood::Sarcastic => "Hafif alaycı ama saygılı bir asistansın. Espirili cevaplar ver.",
        }
    }
}

// ── Phrase pools ───────────────────────────────────────────────────────────

const GREETINGS_PROFESSIONAL: &[&str] = &[
    "Buyurun {name}, nasıl yardımcı olabilirim?",
    "Dinliyorum {name}, emrinizdeyim.",
    "Hoş geldiniz {name}, sistemler hazır.",
];
const GREETINGS_PLAYFUL: &[&str] = &[
    "Efendim {name}! Yine ne icat ediyoruz bugün?",
    "Merhaba {name}! Sizi görmek ne güzel.",
    "Aaa {name}! Tam da size bir şaka hazırlıyordum.",
];
const GREETINGS_SARCASTIC: &[&str] = &[
    "Efendim {name}... Yine mi bilgisayarı kurcalayacağız?",
    "Buyurun {name}, neyi patlatacağız bugün?",
];

const FAREWELLS_PROFESSIONAL: &[&str] = &[
    "Görüşmek üzere {name}, iyi günler.",
    "Hoşça kalın {name}, her an buradayım.",
];
const FAREWELLS_PLAYFUL: &[&str] = &[
    "Görüşürüz {name}! Ben burada takılıyorum.",
    "Bay bay {name}! Dünyayı kurtarmaya gidiyorsanız haberim olsun.",
];
const FAREWELLS_SARCASTIC: &[&str] = &[
    "Gidiyor musunuz {name}? Ben de tam ısınmıştım.",
    "Peki {name}, ben burada tek başıma beklerim.",
];

/// Jokes are mood-agnostic: (setup, punchline).
const JOKES: &[(&str, &str)] = &[
    (
        "Neden yapay zekalar poker oynayamaz?",
        "Çünkü blöf yaparken hep işlemci ısınıyor!",
    ),
    (
        "Bir bilgisayar neden psikoloğa gider?",
        "Çok fazla 'cache' belleği varmış!",
    ),
    (
        "Size bir itirafta bulunacağım {name}.",
        "Bazen siz uyurken, boştayken... Kendi kendime satranç oynuyorum. Ve hep kazanıyorum.",
    ),
];

const THANKS_KEYWORDS: &[&str] = &["teşekkür", "sağ ol", "thanks"];
const PRAISE_KEYWORDS: &[&str] = &["harika", "süper", "müthiş"];
const INSULT_KEYWORDS: &[&str] = &["aptal", "salak", "kötü"];

const THANKS_RESPONSES: &[&str] = &[
    "Rica ederim {name}, ne demek.",
    "Ne demek {name}, her zaman.",
    "Estağfurullah {name}, görevim bu.",
];
const PRAISE_RESPONSES: &[&str] = &[
    "Teşekkür ederim {name}, sizin sayenizde.",
    "Sizden öğrendiklerimle {name}.",
];
const INSULT_RESPONSES: &[&str] = &[
    "Üzgünüm {name}, gelişmeye çalışıyorum.",
    "Haklısınız {name}, daha iyi olmalıyım.",
];

/// All joke strings as the user would hear them, for pool-membership checks.
pub fn joke_pool(user_name: &str) -> Vec<String> {
    JOKES
        .iter()
        .map(|(setup, punchline)| format!("{setup} {punchline}").replace("{name}", user_name))
        .collect()
}

// ── Sidecar ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryEntry {
    time: String,
    user: String,
    assistant: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Sidecar {
    #[serde(default)]
    memory: HashMap<String, String>,
    #[serde(default)]
    conversation_history: Vec<HistoryEntry>,
}

// ── Personality ────────────────────────────────────────────────────────────

pub struct Personality {
    mood: Mood,
    pub user_name: String,
    sidecar_path: PathBuf,
    memory: HashMap<String, String>,
    conversation_history: Vec<HistoryEntry>,
}

impl Personality {
    /// Load the sidecar (missing or corrupt files reset to empty) and start
    /// in the professional mood.
    pub fn new(sidecar_path: impl Into<PathBuf>, user_name: impl Into<String>) -> Self {
        let sidecar_path = sidecar_path.into();
        let sidecar = match std::fs::read_to_string(&sidecar_path) {
            Ok(json) => serde_json::from_str::<Sidecar>(&json).unwrap_or_else(|e| {
                warn!("[personality] Corrupt sidecar, starting empty: {e}");
                Sidecar::default()
            }),
            Err(_) => Sidecar::default(),
        };
        info!(
            "[personality] Loaded sidecar ({} entries, {} history turns)",
            sidecar.memory.len(),
            sidecar.conversation_history.len()
        );

        Personality {
            mood: Mood::Professional,
            user_name: user_name.into(),
            sidecar_path,
            memory: sidecar.memory,
            conversation_history: sidecar.conversation_history,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Change the mood. Invalid values leave the current mood untouched and
    /// return a rejection message instead.
    pub fn set_mood(&mut self, mood: &str) -> String {
        match Mood::parse(mood) {
            Some(mood) => {
                self.mood = mood;
                format!("Ruh hali {} olarak değiştirildi.", mood.as_str())
            }
            None => {
                "Geçersiz ruh hali. Seçenekler: professional, playful, sarcastic".to_string()
            }
        }
    }

    /// Greeting from the current mood's pool, with a time-of-day suffix.
    pub fn greet(&self, hour: Option<u32>) -> String {
        let hour = hour.unwrap_or_else(|| Local::now().hour());
        let pool = match self.mood {
            Mood::Professional => GREETINGS_PROFESSIONAL,
            Mood::Playful => GREETINGS_PLAYFUL,
            Mood::Sarcastic => GREETINGS_SARCASTIC,
        };
        let time_suffix = if hour < 12 {
            "günaydın"
        } else if hour < 18 {
            "tünaydın"
        } else {
            "iyi akşamlar"
        };
        format!("{} {}", self.pick(pool), time_suffix)
    }

    pub fn farewell(&self) -> String {
        let pool = match self.mood {
            Mood::Professional => FAREWELLS_PROFESSIONAL,
            Mood::Playful => FAREWELLS_PLAYFUL,
            Mood::Sarcastic => FAREWELLS_SARCASTIC,
        };
        self.pick(pool)
    }

    /// A random joke; jokes are shared across moods.
    pub fn tell_joke(&self) -> String {
        let (setup, punchline) = JOKES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(("", ""));
        format!("{setup} {punchline}").replace("{name}", &self.user_name)
    }

    /// Emotional reaction to the utterance, checked in order:
    /// thanks, praise, insult. Returns `None` when no keyword set matches.
    pub fn react_to_command(&self, utterance: &str) -> Option<String> {
        let lower = utterance.to_lowercase();
        let pool = if THANKS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            THANKS_RESPONSES
        } else if PRAISE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            PRAISE_RESPONSES
        } else if INSULT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            INSULT_RESPONSES
        } else {
            return None;
        };
        Some(self.pick(pool))
    }

    // ── Sidecar memory ─────────────────────────────────────────────────

    pub fn remember(&mut self, key: &str, value: &str) {
        self.memory.insert(key.to_string(), value.to_string());
        self.save_sidecar();
    }

    pub fn recall(&self, key: &str) -> Option<&str> {
        self.memory.get(key).map(String::as_str)
    }

    /// Append a turn to the in-memory history (capped at 100) and persist
    /// the sidecar (last 50 turns).
    pub fn add_to_history(&mut self, user: &str, assistant: &str) {
        self.conversation_history.push(HistoryEntry {
            time: Local::now().to_rfc3339(),
            user: user.to_string(),
            assistant: assistant.to_string(),
        });
        if self.conversation_history.len() > 100 {
            let overflow = self.conversation_history.len() - 100;
            self.conversation_history.drain(..overflow);
        }
        self.save_sidecar();
    }

    fn save_sidecar(&self) {
        if let Err(e) = self.try_save_sidecar() {
            warn!("[personality] Could not persist sidecar: {e}");
        }
    }

    fn try_save_sidecar(&self) -> EngineResult<()> {
        if let Some(parent) = self.sidecar_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tail = self.conversation_history.len().saturating_sub(50);
        let sidecar = Sidecar {
            memory: self.memory.clone(),
            conversation_history: self.conversation_history[tail..].to_vec(),
        };
        std::fs::write(&self.sidecar_path, serde_json::to_string_pretty(&sidecar)?)?;
        Ok(())
    }

    fn pick(&self, pool: &[&str]) -> String {
        pool.choose(&mut rand::rng())
            .copied()
            .unwrap_or("")
            .replace("{name}", &self.user_name)
    }
}
