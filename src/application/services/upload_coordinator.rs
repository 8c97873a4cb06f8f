use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::{
        dto::file_dto::NewFileDTO,
        error::{ApplicationError, SagaOutcome},
        repositories::file_repository::FileRepository,
        services::{object_store::ObjectStore, view_invalidator::ViewInvalidator},
    },
    domain::models::file::{File, FileData},
};

/// Keeps an uploaded object and its file record consistent.
///
/// The object is written first and the record second. If the record cannot be
/// created the object is deleted again; if that delete also fails the object
/// is left orphaned and reported as such. Nothing is retried.
#[derive(Clone)]
pub struct UploadCoordinator {
    object_store: Arc<dyn ObjectStore>,
    file_repository: Arc<dyn FileRepository>,
    view_invalidator: Arc<dyn ViewInvalidator>,
}

impl UploadCoordinator {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        file_repository: Arc<dyn FileRepository>,
        view_invalidator: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self {
            object_store,
            file_repository,
            view_invalidator,
        }
    }

    pub async fn upload(
        &self,
        file_data: FileData,
        owner_id: &str,
        account_id: &str,
        path: &str,
    ) -> SagaOutcome<File> {
        if file_data.filename.trim().is_empty() {
            warn!("Upload rejected: missing file name");
            return SagaOutcome::CompensatedFailure(ApplicationError::Validation(
                "file name is required".to_string(),
            ));
        }
        if owner_id.is_empty() {
            warn!("Upload rejected: missing owner");
            return SagaOutcome::CompensatedFailure(ApplicationError::Validation(
                "owner is required".to_string(),
            ));
        }

        let file_name = file_data.filename.clone();
        let size = file_data.size();

        let stored = match self.object_store.put(file_data).await {
            Ok(stored) if stored.object_ref.is_empty() => {
                error!("Object store returned an empty reference for '{}'", file_name);
                return SagaOutcome::CompensatedFailure(ApplicationError::ObjectStore(
                    "empty object reference".to_string(),
                ));
            }
            Ok(stored) => stored,
            Err(e) => {
                error!("Error uploading '{}' to object store: {}", file_name, e);
                return SagaOutcome::CompensatedFailure(e);
            }
        };

        info!(
            "Stored object {} ({} bytes) for owner {}",
            stored.object_ref, size, owner_id
        );

        let record = NewFileDTO::for_object(&stored, &file_name, owner_id, account_id);

        match self.file_repository.create_file(record).await {
            Ok(file) => {
                info!("Created file record {} -> {}", file.id, file.object_ref);
                self.view_invalidator.invalidate(path);
                SagaOutcome::Committed(file)
            }
            Err(error) => {
                warn!(
                    "Error creating file record for object {}: {}; removing object",
                    stored.object_ref, error
                );
                self.compensate(stored.object_ref, error).await
            }
        }
    }

    async fn compensate(&self, object_ref: String, error: ApplicationError) -> SagaOutcome<File> {
        match self.object_store.delete(&object_ref).await {
            Ok(()) => {
                info!("Removed object {} after failed record creation", object_ref);
                SagaOutcome::CompensatedFailure(error)
            }
            Err(compensation_error) => {
                error!(
                    orphaned_object = %object_ref,
                    primary_error = %error,
                    compensation_error = %compensation_error,
                    "Compensation failed; object left without a file record"
                );
                SagaOutcome::UncompensatedFailure {
                    error,
                    orphaned_object: object_ref,
                    compensation_error: Some(ApplicationError::CompensationFailure(
                        compensation_error.to_string(),
                    )),
                }
            }
        }
    }
}
