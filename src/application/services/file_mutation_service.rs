use std::{collections::BTreeSet, sync::Arc};

use tracing::{error, info};

use crate::{
    application::{
        dto::file_dto::FileUpdateDTO,
        error::{ApplicationError, SagaOutcome},
        repositories::file_repository::FileRepository,
        services::{object_store::ObjectStore, view_invalidator::ViewInvalidator},
    },
    domain::models::file::File,
};

#[derive(Clone)]
pub struct FileMutationService {
    object_store: Arc<dyn ObjectStore>,
    file_repository: Arc<dyn FileRepository>,
    view_invalidator: Arc<dyn ViewInvalidator>,
}

impl FileMutationService {
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

    /// Sets the name to `<base>.<extension>`. The extension is taken as given.
    pub async fn rename(
        &self,
        file_id: &str,
        new_base_name: &str,
        extension: &str,
        path: &str,
    ) -> Result<File, ApplicationError> {
        let base = new_base_name.trim();
        if base.is_empty() {
            return Err(ApplicationError::Validation(
                "file name cannot be empty".to_string(),
            ));
        }

        let name = if extension.is_empty() {
            base.to_string()
        } else {
            format!("{}.{}", base, extension)
        };

        let file = self
            .file_repository
            .update_file(FileUpdateDTO::rename(file_id, name))
            .await
            .map_err(|e| {
                error!("Error renaming file {}: {}", file_id, e);
                e
            })?;

        info!("Renamed file {} to '{}'", file_id, file.name);
        self.view_invalidator.invalidate(path);
        Ok(file)
    }

    /// Replaces the whole share list with `emails`, normalised the way
    /// registration stores them.
    pub async fn update_sharing(
        &self,
        file_id: &str,
        emails: Vec<String>,
        path: &str,
    ) -> Result<File, ApplicationError> {
        let shared_users: BTreeSet<String> = emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();

        let file = self
            .file_repository
            .update_file(FileUpdateDTO::share(file_id, shared_users))
            .await
            .map_err(|e| {
                error!("Error sharing file {}: {}", file_id, e);
                e
            })?;

        info!(
            "Updated sharing for file {} ({} users)",
            file_id,
            file.shared_users.len()
        );
        self.view_invalidator.invalidate(path);
        Ok(file)
    }

    /// Deletes the record, then the object. The object is only touched once
    /// the record is confirmed gone.
    pub async fn delete(&self, file_id: &str, object_ref: &str, path: &str) -> SagaOutcome<()> {
        if let Err(e) = self.file_repository.delete_file(file_id).await {
            error!("Error deleting file record {}: {}", file_id, e);
            return SagaOutcome::CompensatedFailure(e);
        }

        match self.object_store.delete(object_ref).await {
            Ok(()) => {
                info!("Deleted file {} and object {}", file_id, object_ref);
                self.view_invalidator.invalidate(path);
                SagaOutcome::Committed(())
            }
            Err(e) => {
                error!(
                    orphaned_object = %object_ref,
                    primary_error = %e,
                    "File record {} deleted but its object could not be removed",
                    file_id
                );
                self.view_invalidator.invalidate(path);
                SagaOutcome::UncompensatedFailure {
                    error: e,
                    orphaned_object: object_ref.to_string(),
                    compensation_error: None,
                }
            }
        }
    }
}
