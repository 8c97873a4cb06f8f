use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::models::file::{FileType, StoredObject};

/// A file record ready to be inserted. Id and creation time are assigned by
/// the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFileDTO {
    pub name: String,
    pub file_type: FileType,
    pub extension: String,
    pub size: u64,
    pub owner: String,
    pub account_id: String,
    pub shared_users: BTreeSet<String>,
    pub object_ref: String,
}

impl NewFileDTO {
    /// Record for a freshly stored object. Nobody is shared on creation.
    pub fn for_object(
        object: &StoredObject,
        file_name: &str,
        owner_id: &str,
        account_id: &str,
    ) -> Self {
        let (file_type, extension) = FileType::from_file_name(file_name);
        Self {
            name: object.name.clone(),
            file_type,
            extension,
            size: object.size,
            owner: owner_id.to_string(),
            account_id: account_id.to_string(),
            shared_users: BTreeSet::new(),
            object_ref: object.object_ref.clone(),
        }
    }
}

/// Partial update. Only the mutable fields of a file record appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUpdateDTO {
    pub file_id: String,
    pub name: Option<String>,
    pub shared_users: Option<BTreeSet<String>>,
}

impl FileUpdateDTO {
    pub fn rename(file_id: &str, name: String) -> Self {
        Self {
            file_id: file_id.to_string(),
            name: Some(name),
            ..Default::default()
        }
    }

    pub fn share(file_id: &str, shared_users: BTreeSet<String>) -> Self {
        Self {
            file_id: file_id.to_string(),
            shared_users: Some(shared_users),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.shared_users.is_none()
    }
}
