// Google Gemini backend over the generateContent REST endpoint.

use super::{error_snippet, http_client, ChatProvider};
use crate::error::{EngineError, EngineResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, model: &str) -> Self {
        GeminiProvider {
            client: http_client(),
            api_key,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn is_available(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn complete(&self, prompt: &str, system: Option<&str>) -> EngineResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EngineError::provider("gemini", "API key missing"))?;
        let url = format!(
            "{BASE_URL}/models/{}:generateContent?key={api_key}",
            self.model
        );

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });
        if let Some(system) = system {
            body["systemInstruction"] = json!({"parts": [{"text": system}]});
        }

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EngineError::provider(
                "gemini",
                format!("HTTP {}: {}", status.as_u16(), error_snippet(&text)),
            ));
        }

        let value: Value = response.json().await?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::provider("gemini", "no candidate text in response"))
    }
}
