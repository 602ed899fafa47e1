use clima_core::{AppError, WeatherError};
use clima_weather::WeatherError as ProviderError;

use super::IntoAppError;

impl IntoAppError for ProviderError {
    fn into_app_error(self) -> AppError {
        match self {
            ProviderError::CityNotFound(city) => AppError::Weather(WeatherError::CityNotFound(city)),
            ProviderError::Api { status, message } => {
                AppError::Weather(WeatherError::ApiError { status, message })
            }
            ProviderError::Network(e) => {
                AppError::Weather(WeatherError::ConnectionFailed(e.to_string()))
            }
            ProviderError::Parse(s) => AppError::Weather(WeatherError::InvalidResponse(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_city() {
        let err = ProviderError::CityNotFound("Atlantis".into()).into_app_error();
        assert!(matches!(
            err,
            AppError::Weather(WeatherError::CityNotFound(ref c)) if c == "Atlantis"
        ));
        assert_eq!(err.user_message(), "Cidade não encontrada.");
    }

    #[test]
    fn test_parse_maps_to_generic_failure() {
        let err = ProviderError::Parse("missing field `wind`".into()).into_app_error();
        assert_eq!(err.user_message(), "Erro ao buscar dados do clima.");
    }
}
