// Local Ollama backend. Availability means the daemon answers /api/tags.

use super::{http_client, ChatProvider};
use crate::error::{EngineError, EngineResult};
use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde_json::{json, Value};

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        OllamaProvider {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("[providers] Ollama probe failed: {e}");
                false
            }
        }
    }

    async fn complete(&self, prompt: &str, system: Option<&str>) -> EngineResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let mut body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.7,
                "top_p": 0.9,
            }
        });
        if let Some(system) = system {
            body["system"] = json!(system);
        }

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(EngineError::provider(
                "ollama",
                format!("HTTP {}", response.status().as_u16()),
            ));
        }

        let value: Value = response.json().await?;
        value["response"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::provider("ollama", "response field missing"))
    }
}
