//! Weather lookup adapter (open-meteo compatible).
//!
//! One request, one response. No retry and no cache: callers that only want
//! something to display use [`WeatherClient::fetch_current_opt`] and show
//! nothing on failure.

use crate::errors::{AppError, AppResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/";

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current_weather: CurrentWeatherBody,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    temperature: f64,
    weathercode: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature_celsius: f64,
    pub weather_code: i32,
}

impl From<WeatherResponse> for CurrentWeather {
    fn from(res: WeatherResponse) -> Self {
        Self {
            temperature_celsius: res.current_weather.temperature,
            weather_code: res.current_weather.weathercode,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        // `join` drops the last path segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::Config(format!("invalid weather_base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// `GET {base}/v1/forecast?latitude=..&longitude=..&current_weather=true`
    pub fn forecast_url(&self, lat: f64, lon: f64) -> AppResult<Url> {
        let mut url = self
            .base_url
            .join("v1/forecast")
            .map_err(|err| AppError::Config(format!("invalid weather_base_url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("latitude", &lat.to_string())
            .append_pair("longitude", &lon.to_string())
            .append_pair("current_weather", "true");
        Ok(url)
    }

    #[instrument(skip(self))]
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> AppResult<CurrentWeather> {
        let url = self.forecast_url(lat, lon)?;
        let res = self.http.get(url).send().await?.error_for_status()?;
        let body = res.json::<WeatherResponse>().await?;
        Ok(body.into())
    }

    /// Like [`WeatherClient::fetch_current`], with every failure mapped to `None`.
    pub async fn fetch_current_opt(&self, lat: f64, lon: f64) -> Option<CurrentWeather> {
        match self.fetch_current(lat, lon).await {
            Ok(w) => Some(w),
            Err(e) => {
                warn!(error = %e, "weather lookup failed");
                None
            }
        }
    }
}

/// Decode a forecast response body.
pub fn parse_response(body: &str) -> AppResult<CurrentWeather> {
    let res: WeatherResponse = serde_json::from_str(body)
        .map_err(|e| AppError::InvalidInput(format!("weather response: {e}")))?;
    Ok(res.into())
}

/// Short label for a WMO weather interpretation code.
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}
