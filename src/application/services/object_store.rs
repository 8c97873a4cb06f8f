use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StoredObject},
};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores the bytes under a freshly generated key.
    async fn put(&self, file_data: FileData) -> Result<StoredObject, ApplicationError>;
    async fn delete(&self, object_ref: &str) -> Result<(), ApplicationError>;
    /// Public URL of an object. Deterministic in `object_ref`.
    fn object_url(&self, object_ref: &str) -> String;
    fn provider_name(&self) -> &'static str;
}
