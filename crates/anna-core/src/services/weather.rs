// OpenWeatherMap wrapper: current conditions plus a five-day forecast
// collapsed to daily averages. Responses are requested metric and in
// Turkish, then rendered as the emoji block the voice layer reads out.

use super::WeatherService;
use crate::error::{EngineError, EngineResult};
use crate::providers::http_client;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use log::error;
use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const WIND_DIRECTIONS: [&str; 8] = [
    "Kuzey", "Kuzeydoğu", "Doğu", "Güneydoğu", "Güney", "Güneybatı", "Batı", "Kuzeybatı",
];

fn weather_emoji(main: &str) -> &'static str {
    match main {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" | "Haze" => "🌫️",
        "Smoke" | "Dust" | "Sand" | "Squall" => "💨",
        "Tornado" => "🌪️",
        _ => "🌡️",
    }
}

pub struct OpenWeather {
    client: Client,
    api_key: String,
}

impl OpenWeather {
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenWeather {
            client: http_client(),
            api_key: api_key.into(),
        }
    }

    async fn fetch(&self, endpoint: &str, city: &str) -> EngineResult<Value> {
        let response = self
            .client
            .get(format!("{BASE_URL}/{endpoint}"))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "tr"),
            ])
            .send()
            .await?;
        let status = response.status();
        let data: Value = response.json().await?;
        if !status.is_success() {
            let message = data["message"].as_str().unwrap_or("Bilinmeyen hata");
            error!("[services] Weather lookup failed for {city}: {message}");
            return Err(EngineError::service(
                "weather",
                format!("{city}: {message}"),
            ));
        }
        Ok(data)
    }
}

#[async_trait]
impl WeatherService for OpenWeather {
    async fn current(&self, city: &str) -> EngineResult<String> {
        let data = self.fetch("weather", city).await?;

        let main = &data["main"];
        let temp = main["temp"].as_f64().unwrap_or(0.0);
        let feels_like = main["feels_like"].as_f64().unwrap_or(temp);
        let temp_min = main["temp_min"].as_f64().unwrap_or(temp);
        let temp_max = main["temp_max"].as_f64().unwrap_or(temp);
        let humidity = main["humidity"].as_i64().unwrap_or(0);

        let condition = data["weather"][0]["main"].as_str().unwrap_or("");
        let description = data["weather"][0]["description"].as_str().unwrap_or("");

        let wind_speed = data["wind"]["speed"].as_f64().unwrap_or(0.0);
        let wind_deg = data["wind"]["deg"].as_f64().unwrap_or(0.0);
        let wind_dir = WIND_DIRECTIONS[(((wind_deg + 22.5) / 45.0) as usize) % 8];

        let visibility_km = data["visibility"].as_f64().unwrap_or(10_000.0) / 1000.0;
        let sunrise = format_local_time(data["sys"]["sunrise"].as_i64());
        let sunset = format_local_time(data["sys"]["sunset"].as_i64());

        Ok(format!(
            "{} {} Hava Durumu\n\
             📊 Durum: {}\n\
             🌡️ Sıcaklık: {:.1}°C (Hissedilen: {:.1}°C)\n\
             📈 Min/Max: {:.1}°C / {:.1}°C\n\
             💧 Nem: %{}\n\
             🌬️ Rüzgar: {} m/s ({})\n\
             👁️ Görüş: {:.1} km\n\
             🌅 Güneş: {} / {}",
            weather_emoji(condition),
            city,
            description,
            temp,
            feels_like,
            temp_min,
            temp_max,
            humidity,
            wind_speed,
            wind_dir,
            visibility_km,
            sunrise,
            sunset,
        ))
    }

    async fn forecast(&self, city: &str) -> EngineResult<String> {
        let data = self.fetch("forecast", city).await?;
        let items = data["list"]
            .as_array()
            .ok_or_else(|| EngineError::service("weather", "forecast list missing"))?;

        // Collapse 3-hourly entries into per-day averages, keeping day order.
        let mut days: Vec<(String, Vec<f64>, Vec<String>)> = Vec::new();
        for item in items {
            let Some(date) = item["dt_txt"].as_str().map(|s| s[..10.min(s.len())].to_string())
            else {
                continue;
            };
            let temp = item["main"]["temp"].as_f64().unwrap_or(0.0);
            let condition = item["weather"][0]["main"].as_str().unwrap_or("").to_string();
            match days.last_mut() {
                Some((d, temps, conditions)) if *d == date => {
                    temps.push(temp);
                    conditions.push(condition);
                }
                _ => days.push((date, vec![temp], vec![condition])),
            }
        }

        let mut lines = Vec::with_capacity(days.len());
        for (date, temps, conditions) in &days {
            let avg = temps.iter().sum::<f64>() / temps.len() as f64;
            let dominant = dominant_condition(conditions);
            let day_label = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|d| d.format("%d.%m").to_string())
                .unwrap_or_else(|_| date.clone());
            lines.push(format!("{} {}: {:.1}°C", weather_emoji(&dominant), day_label, avg));
        }

        Ok(format!("📅 {} {} Günlük Tahmin:\n{}", city, days.len(), lines.join("\n")))
    }
}

fn format_local_time(epoch: Option<i64>) -> String {
    epoch
        .and_then(|t| Local.timestamp_opt(t, 0).single())
        .map(|t: DateTime<Local>| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn dominant_condition(conditions: &[String]) -> String {
    let mut best = ("", 0usize);
    for condition in conditions {
        let count = conditions.iter().filter(|c| *c == condition).count();
        if count > best.1 {
            best = (condition, count);
        }
    }
    best.0.to_string()
}
