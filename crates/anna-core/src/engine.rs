// ── AI engine ──────────────────────────────────────────────────────────────
// The orchestrator behind `respond`. One utterance goes through the trigger
// table; the winning intent runs against the injected capabilities, and a
// miss falls through to a personality reaction and then free conversation
// on the session's chat backend. Whatever the path, exactly one
// conversation record is appended before the reply leaves.

use crate::config::Config;
use crate::dispatch::{classify, Intent};
use crate::error::EngineResult;
use crate::memory::MemoryStore;
use crate::personality::Personality;
use crate::providers::{offline_response, select_backend, ChatProvider};
use crate::services::{
    DuckDuckGo, FaceRecognizer, NewsApi, NewsService, OpenWeather, SearchService, WeatherService,
};
use chrono::{Datelike, Local};
use log::{info, warn};

const FACE_UNAVAILABLE: &str = "Yüz tanıma özelliği bu platformda devre dışıdır.";
const WEATHER_UNAVAILABLE: &str = "Hava durumu servisi bu platformda kullanılamıyor.";
const NEWS_UNAVAILABLE: &str = "Haber servisi bu platformda kullanılamıyor.";
const SEARCH_UNAVAILABLE: &str = "İnternet araması bu platformda kullanılamıyor.";

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Injected capabilities. A platform that cannot provide one leaves the
/// slot `None`; the matching branches answer with a fixed message.
#[derive(Default)]
pub struct ServiceRegistry {
    pub weather: Option<Box<dyn WeatherService>>,
    pub news: Option<Box<dyn NewsService>>,
    pub search: Option<Box<dyn SearchService>>,
    pub face: Option<Box<dyn FaceRecognizer>>,
}

impl ServiceRegistry {
    /// The desktop registry: everything the config has credentials for.
    pub fn from_config(config: &Config) -> Self {
        ServiceRegistry {
            weather: config
                .openweather_api_key
                .as_deref()
                .map(|key| Box::new(OpenWeather::new(key)) as Box<dyn WeatherService>),
            news: config
                .news_api_key
                .as_deref()
                .map(|key| Box::new(NewsApi::new(key)) as Box<dyn NewsService>),
            search: Some(Box::new(DuckDuckGo::new())),
            face: None,
        }
    }
}

pub struct AiEngine {
    personality: Personality,
    memory: MemoryStore,
    services: ServiceRegistry,
    chat: Option<Box<dyn ChatProvider>>,
    user_name: String,
}

impl AiEngine {
    pub fn new(
        personality: Personality,
        memory: MemoryStore,
        services: ServiceRegistry,
        chat: Option<Box<dyn ChatProvider>>,
    ) -> Self {
        let user_name = personality.user_name.clone();
        AiEngine {
            personality,
            memory,
            services,
            chat,
            user_name,
        }
    }

    /// Standard startup: open the store, restore the user's name, probe
    /// the chat backends once and keep the first that answers.
    pub async fn bootstrap(config: &Config) -> EngineResult<Self> {
        let memory = MemoryStore::open(config.db_path())?;
        let user_name = memory
            .get_profile("user_name")?
            .unwrap_or_else(|| "Efendim".to_string());
        let mut personality = Personality::new(config.sidecar_path(), &user_name);
        if let Some(saved_mood) = memory.get_profile("mood")? {
            personality.set_mood(&saved_mood);
        }
        let services = ServiceRegistry::from_config(config);
        let chat = select_backend(config).await;

        info!("[engine] Ready, user: {user_name}");
        Ok(AiEngine::new(personality, memory, services, chat))
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn greet(&self) -> String {
        self.personality.greet(None)
    }

    pub fn farewell(&self) -> String {
        self.personality.farewell()
    }

    pub fn set_mood(&mut self, mood: &str) -> String {
        self.personality.set_mood(mood)
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Answer one utterance. Collaborator failures surface as "❌ …"
    /// strings, never as errors; the single exit below always appends one
    /// conversation record (a storage failure is logged, the reply still
    /// goes out).
    pub async fn respond(&mut self, utterance: &str) -> String {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return String::new();
        }

        let reply = match classify(utterance) {
            Some(route) => match self.handle_intent(route.intent).await {
                Ok(reply) => reply,
                Err(e) => format!("❌ Bir hata oluştu: {e}"),
            },
            None => match self.personality.react_to_command(utterance) {
                Some(reaction) => reaction,
                None => self.chat_fallback(utterance).await,
            },
        };

        if let Err(e) =
            self.memory
                .add_conversation(utterance, &reply, self.personality.mood().as_str())
        {
            warn!("[engine] Could not persist conversation: {e}");
        }
        self.personality.add_to_history(utterance, &reply);
        reply
    }

    async fn handle_intent(&mut self, intent: Intent) -> EngineResult<String> {
        Ok(match intent {
            Intent::RegisterFace { name } => match &self.services.face {
                Some(face) => {
                    let name = if name.is_empty() { "kullanıcı" } else { name.as_str() };
                    if face.register(name)? {
                        "Yüzünüz kaydedildi efendim. Artık sizi tanıyorum.".to_string()
                    } else {
                        "Yüzünüzü kaydedemedim, lütfen tekrar deneyin.".to_string()
                    }
                }
                None => FACE_UNAVAILABLE.to_string(),
            },
            Intent::RecognizeFace => match &self.services.face {
                Some(face) => match face.recognize()? {
                    Some(user) => format!("Hoş geldiniz {user}!"),
                    None => "Yüzünüzü tanıyamadım. Lütfen önce yüz kaydedin.".to_string(),
                },
                None => FACE_UNAVAILABLE.to_string(),
            },
            Intent::Weather { city } => match &self.services.weather {
                Some(weather) if !city.is_empty() => weather.current(&city).await?,
                Some(_) => "Hangi şehrin hava durumunu öğrenmek istersiniz?".to_string(),
                None => WEATHER_UNAVAILABLE.to_string(),
            },
            Intent::Forecast { city } => match &self.services.weather {
                Some(weather) if !city.is_empty() => weather.forecast(&city).await?,
                Some(_) => "Hangi şehrin hava durumunu öğrenmek istersiniz?".to_string(),
                None => WEATHER_UNAVAILABLE.to_string(),
            },
            Intent::Headlines { category } => match &self.services.news {
                Some(news) => news.headlines(category).await?,
                None => NEWS_UNAVAILABLE.to_string(),
            },
            Intent::WebSearch { query } => match &self.services.search {
                Some(search) if !query.is_empty() => search.search(&query).await?,
                Some(_) => "Ne aramamı istersiniz?".to_string(),
                None => SEARCH_UNAVAILABLE.to_string(),
            },
            Intent::SetName { name } => {
                if name.is_empty() {
                    "İsminizi tam anlayamadım, tekrar söyler misiniz?".to_string()
                } else {
                    self.memory.set_profile("user_name", &name)?;
                    self.user_name = name.clone();
                    self.personality.user_name = name.clone();
                    format!("Hoş geldin {name}! Seni tanıdığıma memnun oldum.")
                }
            }
            Intent::AskName => format!("Adın {}, bunu nasıl unutursun?", self.user_name),
            Intent::History => {
                let recent = self.memory.recent_conversations(3)?;
                if recent.is_empty() {
                    "Daha önce konuşmadık gibi?".to_string()
                } else {
                    let mut reply = "Son konuştuklarımız:\n".to_string();
                    for record in recent {
                        reply.push_str(&format!("• Sen: {}\n", truncate(&record.user_input, 50)));
                    }
                    reply
                }
            }
            Intent::TakeNote { content } => {
                if content.is_empty() {
                    "Ne not almamı istersiniz?".to_string()
                } else {
                    let id = self.memory.add_note("Hızlı Not", &content, None)?;
                    format!("Not alındı (ID: {id})")
                }
            }
            Intent::ListNotes => {
                let notes = self.memory.get_notes(None)?;
                if notes.is_empty() {
                    "Hiç not almamışsın.".to_string()
                } else {
                    let mut reply = "Notların:\n".to_string();
                    for note in notes.iter().take(5) {
                        reply.push_str(&format!("• {}\n", truncate(&note.content, 50)));
                    }
                    reply
                }
            }
            Intent::Stats => {
                let stats = self.memory.usage_stats(7)?;
                format!(
                    "Toplam {} konuşma yaptık. Son 7 günde {} kez konuştuk.",
                    stats.total_conversations, stats.recent_count
                )
            }
            Intent::DateTime => {
                let now = Local::now();
                format!(
                    "Saat {}, {} {} {}",
                    now.format("%H:%M"),
                    now.day(),
                    TURKISH_MONTHS[now.month0() as usize],
                    now.year()
                )
            }
            Intent::TellJoke => self.personality.tell_joke(),
            Intent::SetMood { mood } => {
                let reply = self.personality.set_mood(&mood);
                // Valid changes survive restarts; rejections change nothing.
                if let Err(e) = self
                    .memory
                    .set_profile("mood", self.personality.mood().as_str())
                {
                    warn!("[engine] Could not persist mood: {e}");
                }
                reply
            }
        })
    }

    async fn chat_fallback(&self, utterance: &str) -> String {
        match &self.chat {
            Some(backend) => backend
                .complete(utterance, Some(self.personality.mood().system_prompt()))
                .await
                .unwrap_or_else(|e| format!("❌ Bir hata oluştu: {e}")),
            None => offline_response(utterance, &self.user_name),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect::<String>() + "..."
    }
}
