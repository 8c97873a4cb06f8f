use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Compensation failed: {0}")]
    CompensationFailure(String),

    #[error("No current user could be resolved")]
    AuthResolution,

    #[error("Resource not found")]
    NotFound,
}

/// Result of a two-store operation (upload, delete).
#[derive(Debug)]
pub enum SagaOutcome<T> {
    Committed(T),
    /// The operation failed but both stores are consistent.
    CompensatedFailure(ApplicationError),
    /// The operation failed and left an object with no referencing record.
    UncompensatedFailure {
        error: ApplicationError,
        orphaned_object: String,
        compensation_error: Option<ApplicationError>,
    },
}

impl<T> SagaOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, SagaOutcome::Committed(_))
    }

    pub fn orphaned_object(&self) -> Option<&str> {
        match self {
            SagaOutcome::UncompensatedFailure {
                orphaned_object, ..
            } => Some(orphaned_object),
            _ => None,
        }
    }

    /// Collapses to the value or the primary error. Compensation errors are
    /// never surfaced here.
    pub fn into_result(self) -> Result<T, ApplicationError> {
        match self {
            SagaOutcome::Committed(value) => Ok(value),
            SagaOutcome::CompensatedFailure(error)
            | SagaOutcome::UncompensatedFailure { error, .. } => Err(error),
        }
    }
}
