//! Centralized error types for the Clima application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-facing messages ready to be rendered into the page
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors surfaced by the widget should be convertible to this type.
/// Use `user_message()` to get the text shown in the weather region.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns the message displayed to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Other(_) => "Ocorreu um erro inesperado.",
        }
    }
}

/// Input rejected before any network call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("City name is empty")]
    EmptyCity,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyCity => "Por favor, insira uma cidade.",
        }
    }
}

/// Weather lookup errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) => "Cidade não encontrada.",
            WeatherError::ApiError { .. }
            | WeatherError::ConnectionFailed(_)
            | WeatherError::InvalidResponse(_) => "Erro ao buscar dados do clima.",
        }
    }
}

/// Preference storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write preferences: {0}")]
    WriteFailed(String),

    #[error("Failed to encode value for key {key}: {message}")]
    Encode { key: String, message: String },
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::WriteFailed(_) => "Não foi possível salvar as preferências.",
            StorageError::Encode { .. } => "Não foi possível salvar as preferências.",
        }
    }
}
