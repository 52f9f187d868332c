// Groq backend over the OpenAI-compatible chat completions endpoint.

use super::{error_snippet, http_client, ChatProvider};
use crate::error::{EngineError, EngineResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const DEFAULT_SYSTEM: &str =
    "Sen A.N.N.A'sın. Yardımsever, zeki ve karizmatik bir asistansın. Cevapların kısa ve öz olsun.";

pub struct GroqProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GroqProvider {
    pub fn new(api_key: Option<String>, model: &str) -> Self {
        GroqProvider {
            client: http_client(),
            api_key,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn is_available(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn complete(&self, prompt: &str, system: Option<&str>) -> EngineResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EngineError::provider("groq", "API key missing"))?;

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system.unwrap_or(DEFAULT_SYSTEM)},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.6,
            "max_tokens": 1024
        });

        let response = self
            .client
            .post(CHAT_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EngineError::provider(
                "groq",
                format!("HTTP {}: {}", status.as_u16(), error_snippet(&text)),
            ));
        }

        let value: Value = response.json().await?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::provider("groq", "no choice content in response"))
    }
}
