use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::models::file::{File, FileType};

/// Fixed-width UTC timestamps, so string order matches time order.
pub fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListFilesQuery {
    /// Listing route segment: `documents`, `images`, `media` or `others`.
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub query: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub extension: String,
    pub size: u64,
    pub owner: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub users: Vec<String>,
    #[serde(rename = "objectRef")]
    pub object_ref: String,
    pub url: String,
    #[serde(rename = "createdAt", serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl FileResponse {
    pub fn new(file: File, url: String) -> Self {
        Self {
            id: file.id,
            name: file.name,
            file_type: file.file_type,
            extension: file.extension,
            size: file.size,
            owner: file.owner,
            account_id: file.account_id,
            users: file.shared_users.into_iter().collect(),
            object_ref: file.object_ref,
            url,
            created_at: file.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub total: usize,
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    pub documents: Vec<FileResponse>,
}

#[derive(Debug, Deserialize)]
pub struct RenameFileRequest {
    pub name: String,
    pub extension: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFileUsersRequest {
    pub emails: Vec<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteFileQuery {
    pub path: Option<String>,
}
