use clima_core::AppError;

use super::IntoAppError;

impl IntoAppError for minijinja::Error {
    fn into_app_error(self) -> AppError {
        AppError::Other(anyhow::Error::new(self).context("Failed to render template"))
    }
}
