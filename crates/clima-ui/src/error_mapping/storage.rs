use clima_core::{AppError, StorageError};
use clima_services::StorageError as ServiceStorageError;

use super::IntoAppError;

impl IntoAppError for ServiceStorageError {
    fn into_app_error(self) -> AppError {
        match self {
            e @ ServiceStorageError::Io { .. } => {
                AppError::Storage(StorageError::WriteFailed(e.to_string()))
            }
            ServiceStorageError::Encode { key, source } => {
                AppError::Storage(StorageError::Encode {
                    key,
                    message: source.to_string(),
                })
            }
        }
    }
}
