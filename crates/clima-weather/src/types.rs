use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a lookup was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Explicit submit or recent-search click; results are rendered
    #[default]
    Full,
    /// Live typing; results are discarded
    Preview,
}

impl FetchMode {
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Preview => "preview",
        }
    }
}

/// Current conditions for one city, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    /// Location name as reported by the provider
    pub name: String,
    /// Condition description in the requested language
    pub description: String,
    /// Provider condition code, e.g. `"09d"`
    pub icon_code: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity, percent
    pub humidity: u8,
    /// Wind speed in meters per second
    pub wind_speed: f64,
    pub fetched_at: DateTime<Utc>,
}

// Wire format of `GET /data/2.5/weather`. Only the fields we render.

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub name: String,
    pub weather: Vec<ApiCondition>,
    pub main: ApiMain,
    pub wind: ApiWind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWind {
    pub speed: f64,
}

/// Error body returned by the provider on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

impl ApiResponse {
    /// Convert the wire response, rejecting shapes we cannot render
    pub(crate) fn into_result(self) -> Result<WeatherResult, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        Ok(WeatherResult {
            name: self.name,
            description: condition.description,
            icon_code: condition.icon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            fetched_at: Utc::now(),
        })
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "name": "São Paulo",
            "weather": [{ "id": 521, "main": "Rain", "description": "chuva de banho", "icon": "09d" }],
            "main": { "temp": 21.6, "feels_like": 21.9, "humidity": 83, "pressure": 1015 },
            "wind": { "speed": 5.0, "deg": 150 },
            "cod": 200
        })
    }

    #[test]
    fn test_decode_provider_response() {
        let resp: ApiResponse = serde_json::from_value(sample_json()).unwrap();
        let result = resp.into_result().unwrap();

        assert_eq!(result.name, "São Paulo");
        assert_eq!(result.description, "chuva de banho");
        assert_eq!(result.icon_code, "09d");
        assert_eq!(result.humidity, 83);
        assert!((result.wind_speed - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_weather_array_is_parse_error() {
        let mut json = sample_json();
        json["weather"] = serde_json::json!([]);
        let resp: ApiResponse = serde_json::from_value(json).unwrap();

        assert!(matches!(resp.into_result(), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_missing_main_fails_to_decode() {
        let mut json = sample_json();
        json.as_object_mut().unwrap().remove("main");

        assert!(serde_json::from_value::<ApiResponse>(json).is_err());
    }

    #[test]
    fn test_fetch_mode_defaults_to_full() {
        assert_eq!(FetchMode::default(), FetchMode::Full);
        assert!(FetchMode::Preview.is_preview());
        assert_eq!(FetchMode::Preview.as_str(), "preview");
    }
}
