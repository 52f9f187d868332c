// The trigger table. Order is load-bearing: face recognition sits above
// web search so "ben kimim" never falls through to a generic search, the
// forecast rule sits above plain weather so "yarın hava" is a forecast,
// and note taking sits above search so note text may contain "ara".

use super::{Intent, TriggerRule};
use regex::Regex;
use std::sync::LazyLock;

static WEATHER_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hava|nasıl|durumu|kaç derece|sıcaklık").unwrap());
static FORECAST_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"yarın hava|tahmin").unwrap());
static SEARCH_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"internette ara|google'da ara|youtube'da ara|sorgula|ara").unwrap()
});
static FACE_REGISTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)yüz kaydet").unwrap());
static SET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)benim adım").unwrap());
static TAKE_NOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)not al").unwrap());
static MOOD_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"professional|playful|sarcastic").unwrap());

fn strip(pattern: &Regex, text: &str) -> String {
    pattern.replace_all(text, "").trim().to_string()
}

pub static TRIGGERS: &[TriggerRule] = &[
    TriggerRule {
        id: "face_register",
        matches: |t| t.contains("yüz kaydet"),
        extract: |_, original| Intent::RegisterFace {
            name: strip(&FACE_REGISTER, original),
        },
    },
    TriggerRule {
        id: "face_recognize",
        matches: |t| t.contains("ben kimim") || t.contains("yüz tanı"),
        extract: |_, _| Intent::RecognizeFace,
    },
    TriggerRule {
        id: "forecast",
        matches: |t| t.contains("tahmin") || t.contains("yarın hava"),
        extract: |lower, _| Intent::Forecast {
            city: strip(&FORECAST_NOISE, lower),
        },
    },
    TriggerRule {
        id: "weather",
        matches: |t| t.contains("hava"),
        extract: |lower, _| Intent::Weather {
            city: strip(&WEATHER_NOISE, lower),
        },
    },
    TriggerRule {
        id: "headlines",
        matches: |t| t.contains("haber") || t.contains("manşet"),
        extract: |lower, _| {
            let category = if lower.contains("teknoloji") {
                Some("technology")
            } else if lower.contains("spor") {
                Some("sports")
            } else if lower.contains("ekonomi") {
                Some("business")
            } else {
                None
            };
            Intent::Headlines { category }
        },
    },
    TriggerRule {
        id: "set_name",
        matches: |t| t.contains("benim adım"),
        extract: |_, original| Intent::SetName {
            name: strip(&SET_NAME, original),
        },
    },
    TriggerRule {
        id: "ask_name",
        matches: |t| t.contains("adım ne"),
        extract: |_, _| Intent::AskName,
    },
    TriggerRule {
        id: "take_note",
        matches: |t| t.contains("not al"),
        extract: |_, original| Intent::TakeNote {
            content: strip(&TAKE_NOTE, original),
        },
    },
    TriggerRule {
        id: "web_search",
        matches: |t| t.contains("ara") || t.contains("sorgula"),
        extract: |lower, _| Intent::WebSearch {
            query: strip(&SEARCH_NOISE, lower),
        },
    },
    TriggerRule {
        id: "history",
        matches: |t| t.contains("dün ne konuştuk") || t.contains("geçmiş"),
        extract: |_, _| Intent::History,
    },
    TriggerRule {
        id: "list_notes",
        matches: |t| t.contains("notlarım"),
        extract: |_, _| Intent::ListNotes,
    },
    TriggerRule {
        id: "stats",
        matches: |t| t.contains("istatistik") || t.contains("kaç konuşma"),
        extract: |_, _| Intent::Stats,
    },
    TriggerRule {
        id: "datetime",
        matches: |t| t.contains("tarih") || t.contains("saat"),
        extract: |_, _| Intent::DateTime,
    },
    TriggerRule {
        id: "joke",
        matches: |t| t.contains("şaka yap"),
        extract: |_, _| Intent::TellJoke,
    },
    TriggerRule {
        id: "set_mood",
        matches: |t| t.contains("ruh hali"),
        extract: |lower, _| Intent::SetMood {
            mood: MOOD_WORD
                .find(lower)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        },
    },
];
