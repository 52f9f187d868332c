// ── Services ───────────────────────────────────────────────────────────────
// Narrow capability traits for the direct-answer branches. Every method
// returns a fully formatted Turkish string so the dispatch handlers stay
// one-liners. The engine holds each capability as an Option: a platform
// that cannot provide one simply leaves it unset and the matching branch
// answers with a fixed "unavailable" message.

pub mod news;
pub mod weather;
pub mod web_search;

pub use news::NewsApi;
pub use weather::OpenWeather;
pub use web_search::DuckDuckGo;

use crate::error::EngineResult;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, city: &str) -> EngineResult<String>;
    async fn forecast(&self, city: &str) -> EngineResult<String>;
}

#[async_trait]
pub trait NewsService: Send + Sync {
    async fn headlines(&self, category: Option<&str>) -> EngineResult<String>;
}

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> EngineResult<String>;
}

/// Opaque vision capability. No bundled implementation; the desktop front
/// end injects one, other platforms leave it out.
pub trait FaceRecognizer: Send + Sync {
    fn register(&self, name: &str) -> EngineResult<bool>;
    fn recognize(&self) -> EngineResult<Option<String>>;
}
