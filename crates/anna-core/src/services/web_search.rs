// DuckDuckGo instant-answer search. No key needed; the abstract text is
// preferred and related topics fill in when the abstract is empty.

use super::SearchService;
use crate::error::{EngineError, EngineResult};
use crate::providers::http_client;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const MAX_RESULTS: usize = 3;

pub struct DuckDuckGo {
    client: Client,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        DuckDuckGo {
            client: http_client(),
        }
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for DuckDuckGo {
    async fn search(&self, query: &str) -> EngineResult<String> {
        let url = format!(
            "https://api.duckduckgo.com/?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(EngineError::service(
                "search",
                format!("HTTP {}", response.status().as_u16()),
            ));
        }
        let data: Value = response.json().await?;

        let mut lines = Vec::new();

        if let Some(abstract_text) = data["AbstractText"].as_str() {
            if !abstract_text.is_empty() {
                lines.push(format!("🔍 {abstract_text}"));
                if let Some(source_url) = data["AbstractURL"].as_str() {
                    if !source_url.is_empty() {
                        lines.push(format!("   🔗 {source_url}"));
                    }
                }
            }
        }

        if lines.is_empty() {
            if let Some(topics) = data["RelatedTopics"].as_array() {
                for topic in topics.iter().take(MAX_RESULTS) {
                    if let Some(text) = topic["Text"].as_str() {
                        lines.push(format!("🔍 {text}"));
                        if let Some(topic_url) = topic["FirstURL"].as_str() {
                            lines.push(format!("   🔗 {topic_url}"));
                        }
                    }
                }
            }
        }

        if lines.is_empty() {
            return Ok(format!("📭 '{query}' için sonuç bulunamadı."));
        }
        Ok(format!("📊 '{query}' için sonuçlar:\n{}", lines.join("\n")))
    }
}
