// ── Engine configuration ───────────────────────────────────────────────────
// All knobs come from the environment; missing keys simply disable the
// capability they unlock (the dispatch engine answers with an
// "unavailable" message for those branches instead of failing at startup).

use std::path::PathBuf;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite store and the personality sidecar.
    pub data_dir: PathBuf,
    /// Base URL of the local Ollama server.
    pub ollama_url: String,
    /// Ollama chat model.
    pub chat_model: String,
    /// Gemini API key + model.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Groq API key + model.
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    /// OpenWeatherMap API key.
    pub openweather_api_key: Option<String>,
    /// NewsAPI key.
    pub news_api_key: Option<String>,
}

impl Config {
    /// Build a config from environment variables. Empty values count as unset.
    pub fn from_env() -> Self {
        let data_dir = env_opt("ANNA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("anna")
            });

        Config {
            data_dir,
            ollama_url: env_opt("OLLAMA_URL")
                .unwrap_or_else(|| "http://localhost:11434".into()),
            chat_model: env_opt("ANNA_CHAT_MODEL").unwrap_or_else(|| "qwen2.5:7b".into()),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model: env_opt("GEMINI_MODEL").unwrap_or_else(|| "gemini-1.5-flash".into()),
            groq_api_key: env_opt("GROQ_API_KEY"),
            groq_model: env_opt("GROQ_MODEL")
                .unwrap_or_else(|| "llama-3.3-70b-versatile".into()),
            openweather_api_key: env_opt("OPENWEATHER_API_KEY"),
            news_api_key: env_opt("NEWS_API_KEY"),
        }
    }

    /// Path of the engine's SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("anna.db")
    }

    /// Path of the personality JSON sidecar.
    pub fn sidecar_path(&self) -> PathBuf {
        self.data_dir.join("personality.json")
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
