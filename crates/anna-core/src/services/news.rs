// NewsAPI wrapper: Turkish top headlines, numbered, with source and date.

use super::NewsService;
use crate::error::{EngineError, EngineResult};
use crate::providers::http_client;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "https://newsapi.org/v2";
const PAGE_SIZE: usize = 5;

fn category_label(category: Option<&str>) -> &'static str {
    match category {
        Some("business") => "💰 Ekonomi",
        Some("technology") => "💻 Teknoloji",
        Some("science") => "🔬 Bilim",
        Some("health") => "🏥 Sağlık",
        Some("sports") => "⚽ Spor",
        Some("entertainment") => "🎬 Eğlence",
        _ => "📰 Genel",
    }
}

pub struct NewsApi {
    client: Client,
    api_key: String,
}

impl NewsApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        NewsApi {
            client: http_client(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl NewsService for NewsApi {
    async fn headlines(&self, category: Option<&str>) -> EngineResult<String> {
        let mut query = vec![
            ("country", "tr"),
            ("apiKey", self.api_key.as_str()),
            ("pageSize", "5"),
        ];
        if let Some(category) = category {
            query.push(("category", category));
        }

        let response = self
            .client
            .get(format!("{BASE_URL}/top-headlines"))
            .query(&query)
            .send()
            .await?;
        let data: Value = response.json().await?;

        if data["status"].as_str() != Some("ok") {
            let message = data["message"].as_str().unwrap_or("Bilinmeyen hata");
            return Err(EngineError::service("news", message));
        }

        let label = category_label(category);
        let articles = data["articles"].as_array().cloned().unwrap_or_default();
        if articles.is_empty() {
            return Ok(format!("📭 {label} haber bulunamadı."));
        }

        let mut lines = Vec::new();
        for (i, article) in articles.iter().take(PAGE_SIZE).enumerate() {
            let mut title = article["title"].as_str().unwrap_or("").to_string();
            if title.chars().count() > 70 {
                title = title.chars().take(67).collect::<String>() + "...";
            }
            let source = article["source"]["name"].as_str().unwrap_or("");
            let date = article["publishedAt"]
                .as_str()
                .map(|t| &t[..10.min(t.len())])
                .unwrap_or("");
            lines.push(format!("{}. {title}", i + 1));
            lines.push(format!("   📍 {source} | 📅 {date}"));
        }

        Ok(format!("{label} Manşetleri:\n{}", lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_map_known_slugs() {
        assert_eq!(category_label(Some("technology")), "💻 Teknoloji");
        assert_eq!(category_label(Some("sports")), "⚽ Spor");
        assert_eq!(category_label(None), "📰 Genel");
        assert_eq!(category_label(Some("weird")), "📰 Genel");
    }
}
