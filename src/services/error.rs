use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        ApplicationError::ObjectStore(error.to_string())
    }
}

impl<E, R> From<SdkError<E, R>> for StorageError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(error: SdkError<E, R>) -> Self {
        let message = DisplayErrorContext(&error).to_string();
        match error {
            SdkError::TimeoutError(_) => StorageError::NetworkError("Request timeout".to_string()),
            SdkError::DispatchFailure(_) => {
                StorageError::NetworkError(format!("Connection failed: {}", message))
            }
            SdkError::ServiceError(_) | SdkError::ResponseError(_) => {
                StorageError::ProviderError(message)
            }
            _ => StorageError::InternalError(message),
        }
    }
}
