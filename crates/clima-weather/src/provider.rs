//! OpenWeatherMap current-weather client.

use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{ApiErrorBody, ApiResponse, FetchMode, WeatherError, WeatherResult};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_url: String,
    pub api_key: String,
    pub units: String,
    pub lang: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_url: OPENWEATHER_API_BASE.to_string(),
            api_key: String::new(),
            units: "metric".to_string(),
            lang: "pt_br".to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    settings: ProviderSettings,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            settings,
        })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Fetch current conditions for `city`.
    ///
    /// Issues exactly one GET. The mode only tags the trace; callers decide
    /// what to render.
    #[instrument(skip(self, mode), fields(mode = mode.as_str()), level = "info")]
    pub async fn fetch(&self, city: &str, mode: FetchMode) -> Result<WeatherResult, WeatherError> {
        let url = format!(
            "{}{}",
            self.settings.api_url.trim_end_matches('/'),
            CURRENT_WEATHER_PATH
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.settings.units.as_str()),
                ("lang", self.settings.lang.as_str()),
                ("appid", self.settings.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Provider reported city not found");
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            tracing::warn!("Weather request failed with status {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let decoded: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))?;

        let result = decoded.into_result()?;
        tracing::debug!("Fetched weather for {}", result.name);
        Ok(result)
    }
}
