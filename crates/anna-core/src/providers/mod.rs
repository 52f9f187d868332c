// ── Chat providers ─────────────────────────────────────────────────────────
// Free-conversation backends behind one trait. The engine probes them once
// at startup in a fixed order (local Ollama first, then the cloud APIs) and
// keeps the first available one for the whole session. A failed call on the
// chosen backend surfaces as a "❌ …" string upstream, never a retry on a
// different backend.

pub mod gemini;
pub mod groq;
pub mod ollama;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;

use crate::config::Config;
use crate::error::EngineResult;
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::time::Duration;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap availability probe used once at startup. Cloud backends check
    /// for a credential; the local backend checks the endpoint answers.
    async fn is_available(&self) -> bool;

    /// One completion for `prompt`, with an optional system instruction.
    async fn complete(&self, prompt: &str, system: Option<&str>) -> EngineResult<String>;
}

pub(crate) fn http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
        .unwrap_or_default()
}

/// First 200 characters of an error body for the error message. Counts
/// chars, not bytes: provider error JSON often carries non-ASCII text and
/// a byte slice could land mid-character.
pub(crate) fn error_snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Probe the backends in preference order and return the first available.
pub async fn select_backend(config: &Config) -> Option<Box<dyn ChatProvider>> {
    let candidates: Vec<Box<dyn ChatProvider>> = vec![
        Box::new(OllamaProvider::new(&config.ollama_url, &config.chat_model)),
        Box::new(GeminiProvider::new(
            config.gemini_api_key.clone(),
            &config.gemini_model,
        )),
        Box::new(GroqProvider::new(
            config.groq_api_key.clone(),
            &config.groq_model,
        )),
    ];

    for candidate in candidates {
        if candidate.is_available().await {
            info!("[providers] Using chat backend: {}", candidate.name());
            return Some(candidate);
        }
    }
    info!("[providers] No chat backend available, offline responses only");
    None
}

/// Canned replies for when no backend answered the startup probe.
pub fn offline_response(utterance: &str, user_name: &str) -> String {
    let lower = utterance.to_lowercase();
    if lower.contains("merhaba") || lower.contains("selam") {
        return format!("Merhaba {user_name}, nasılsın?");
    }
    if lower.contains("nasılsın") {
        return "İyiyim, seni dinliyorum!".to_string();
    }
    if lower.contains("ne yapıyorsun") {
        return "Sana yardım etmeye çalışıyorum. Bir şey sormak ister misin?".to_string();
    }
    if lower.contains("teşekkür") {
        return "Rica ederim, her zaman!".to_string();
    }
    if lower.contains("görüşürüz") || lower.contains("hoşçakal") {
        return "Görüşmek üzere, iyi günler!".to_string();
    }
    "Anladım. Devam etmek için internet bağlantısı gerekebilir, şu an çevrimdışıyım.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_responses_cover_greetings_and_default() {
        assert_eq!(
            offline_response("Merhaba", "Ali"),
            "Merhaba Ali, nasılsın?"
        );
        assert_eq!(offline_response("çok teşekkürler", "Ali"), "Rica ederim, her zaman!");
        assert!(offline_response("kuantum fiziği anlat", "Ali").contains("çevrimdışıyım"));
    }

    #[test]
    fn error_snippet_truncates_on_char_boundaries() {
        // A 200-byte slice of this body would split a 'ğ' in half.
        let body = "ğ".repeat(300);
        let snippet = error_snippet(&body);
        assert_eq!(snippet.chars().count(), 200);
        assert!(snippet.chars().all(|c| c == 'ğ'));

        assert_eq!(error_snippet("model not found"), "model not found");
    }

    #[tokio::test]
    async fn cloud_backends_without_keys_are_unavailable() {
        assert!(!GeminiProvider::new(None, "gemini-1.5-flash").is_available().await);
        assert!(!GroqProvider::new(None, "llama-3.3-70b-versatile").is_available().await);
        assert!(
            GroqProvider::new(Some("gsk_test".into()), "llama-3.3-70b-versatile")
                .is_available()
                .await
        );
    }
}
