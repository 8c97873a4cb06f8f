mod error;
mod memory_object_store;
mod s3_object_store;

pub use error::StorageError;
pub use memory_object_store::MemoryObjectStore;
pub use s3_object_store::S3ObjectStore;

use std::sync::Arc;

use crate::{
    application::services::object_store::ObjectStore,
    domain::config::settings::{ObjectStoreProvider, Settings},
};

pub fn create_object_store(settings: &Settings) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match settings.object_store {
        ObjectStoreProvider::S3 => {
            let s3_settings = settings.s3.clone().ok_or_else(|| {
                StorageError::InternalError("S3 settings not found".to_string())
            })?;

            Ok(Arc::new(S3ObjectStore::new(s3_settings)))
        }
        ObjectStoreProvider::Memory => Ok(Arc::new(MemoryObjectStore::new())),
    }
}
