//! Maps errors from the service crates to clima_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod render;
mod storage;
mod weather;

use clima_core::AppError;

/// Conversion into the application error hierarchy for errors owned by other crates.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
