use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    application::{error::ApplicationError, services::object_store::ObjectStore},
    domain::models::file::{FileData, StoredObject},
    services::{error::StorageError, s3_object_store::generate_object_key},
};

/// Process-local object store for development and tests.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, object_ref: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(object_ref))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        let key = generate_object_key(&file_data.filename);
        let size = file_data.size();

        self.objects
            .lock()
            .map_err(|e| StorageError::InternalError(e.to_string()))?
            .insert(key.clone(), file_data.content);

        Ok(StoredObject {
            object_ref: key,
            name: file_data.filename,
            size,
        })
    }

    async fn delete(&self, object_ref: &str) -> Result<(), ApplicationError> {
        let removed = self
            .objects
            .lock()
            .map_err(|e| StorageError::InternalError(e.to_string()))?
            .remove(object_ref);

        match removed {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(object_ref.to_string()).into()),
        }
    }

    fn object_url(&self, object_ref: &str) -> String {
        format!("memory://objects/{}", object_ref)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
