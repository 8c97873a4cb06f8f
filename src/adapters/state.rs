use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::{
    repositories::{file_repository::FileRepository, user_repository::UserRepository},
    services::{
        file_mutation_service::FileMutationService, file_query_service::FileQueryService,
        object_store::ObjectStore, storage_aggregator::StorageAggregator,
        upload_coordinator::UploadCoordinator, view_invalidator::ViewInvalidator,
    },
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub file_repository: Arc<dyn FileRepository>,
    pub object_store: Arc<dyn ObjectStore>,
    pub upload_coordinator: UploadCoordinator,
    pub file_mutation_service: FileMutationService,
    pub file_query_service: FileQueryService,
    #[from_ref(skip)]
    pub document_store_provider: &'static str,
    #[from_ref(skip)]
    pub capacity_bytes: u64,
}

impl AppState {
    /// Wires the core services around the given store handles.
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        file_repository: Arc<dyn FileRepository>,
        user_repository: Arc<dyn UserRepository>,
        view_invalidator: Arc<dyn ViewInvalidator>,
        capacity_bytes: u64,
        document_store_provider: &'static str,
    ) -> Self {
        Self {
            upload_coordinator: UploadCoordinator::new(
                object_store.clone(),
                file_repository.clone(),
                view_invalidator.clone(),
            ),
            file_mutation_service: FileMutationService::new(
                object_store.clone(),
                file_repository.clone(),
                view_invalidator,
            ),
            file_query_service: FileQueryService::new(
                file_repository.clone(),
                StorageAggregator::new(capacity_bytes),
            ),
            user_repository,
            file_repository,
            object_store,
            document_store_provider,
            capacity_bytes,
        }
    }
}
