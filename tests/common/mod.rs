#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use drive_service::{
    adapters::repositories::MemoryFileRepository,
    application::{
        dto::file_dto::{FileUpdateDTO, NewFileDTO},
        error::ApplicationError,
        queries::file_query::FileQuery,
        repositories::file_repository::FileRepository,
        services::{
            file_mutation_service::FileMutationService,
            file_query_service::FileQueryService, object_store::ObjectStore,
            storage_aggregator::StorageAggregator, upload_coordinator::UploadCoordinator,
            view_invalidator::ViewInvalidator,
        },
    },
    domain::models::{
        file::{File, FileData, StoredObject},
        user::User,
    },
    services::MemoryObjectStore,
};

/// Document store whose individual operations can be made to fail.
#[derive(Default)]
pub struct FlakyFileRepository {
    pub inner: MemoryFileRepository,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
}

fn injected(operation: &str) -> ApplicationError {
    ApplicationError::DocumentStore(format!("injected {} failure", operation))
}

#[async_trait]
impl FileRepository for FlakyFileRepository {
    async fn create_file(&self, file: NewFileDTO) -> Result<File, ApplicationError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(injected("create"));
        }
        self.inner.create_file(file).await
    }

    async fn get_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        self.inner.get_file(file_id).await
    }

    async fn update_file(&self, update: FileUpdateDTO) -> Result<File, ApplicationError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(injected("update"));
        }
        self.inner.update_file(update).await
    }

    async fn delete_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        self.inner.delete_file(file_id).await
    }

    async fn list_files(&self, query: &FileQuery) -> Result<Vec<File>, ApplicationError> {
        self.inner.list_files(query).await
    }
}

/// Object store whose puts and deletes can be made to fail.
#[derive(Default)]
pub struct FlakyObjectStore {
    pub inner: MemoryObjectStore,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[async_trait]
impl ObjectStore for FlakyObjectStore {
    async fn put(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(ApplicationError::ObjectStore("injected put failure".to_string()));
        }
        self.inner.put(file_data).await
    }

    async fn delete(&self, object_ref: &str) -> Result<(), ApplicationError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ApplicationError::ObjectStore(
                "injected delete failure".to_string(),
            ));
        }
        self.inner.delete(object_ref).await
    }

    fn object_url(&self, object_ref: &str) -> String {
        self.inner.object_url(object_ref)
    }

    fn provider_name(&self) -> &'static str {
        "flaky"
    }
}

#[derive(Default)]
pub struct RecordingViewInvalidator {
    pub paths: Mutex<Vec<String>>,
}

impl RecordingViewInvalidator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl ViewInvalidator for RecordingViewInvalidator {
    fn invalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub struct Harness {
    pub objects: Arc<FlakyObjectStore>,
    pub files: Arc<FlakyFileRepository>,
    pub invalidator: Arc<RecordingViewInvalidator>,
    pub uploads: UploadCoordinator,
    pub mutations: FileMutationService,
    pub queries: FileQueryService,
}

impl Harness {
    pub fn new(capacity: u64) -> Self {
        let objects = Arc::new(FlakyObjectStore::default());
        let files = Arc::new(FlakyFileRepository::default());
        let invalidator = Arc::new(RecordingViewInvalidator::default());

        Self {
            uploads: UploadCoordinator::new(objects.clone(), files.clone(), invalidator.clone()),
            mutations: FileMutationService::new(
                objects.clone(),
                files.clone(),
                invalidator.clone(),
            ),
            queries: FileQueryService::new(files.clone(), StorageAggregator::new(capacity)),
            objects,
            files,
            invalidator,
        }
    }

    pub async fn upload(&self, name: &str, size: usize, owner: &User) -> File {
        self.uploads
            .upload(
                FileData::new(vec![7u8; size], name.to_string()),
                &owner.id,
                &owner.account_id,
                "/",
            )
            .await
            .into_result()
            .expect("upload should commit")
    }
}

pub fn user(name: &str) -> User {
    User {
        id: format!("user-{}", name),
        full_name: name.to_string(),
        email: format!("{}@example.com", name),
        avatar: String::new(),
        account_id: format!("account-{}", name),
        is_admin: false,
    }
}
