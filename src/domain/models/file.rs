use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "xls", "xlsx", "csv", "rtf", "ods", "ppt", "odp", "md", "html",
    "htm", "epub", "pages", "fig", "psd", "ai", "indd", "xd", "sketch", "afdesign", "afphoto",
];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Image,
        FileType::Document,
        FileType::Video,
        FileType::Audio,
        FileType::Other,
    ];

    /// Derives the category and the lower-cased extension of a file name.
    /// Names without a dot have an empty extension and fall into `Other`.
    pub fn from_file_name(file_name: &str) -> (FileType, String) {
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        };

        let file_type = if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Document
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Image
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Video
        } else if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Audio
        } else {
            FileType::Other
        };

        (file_type, extension)
    }

    /// Maps a listing route segment to the set of types it shows.
    /// Unknown segments map to the empty set, which means "all types".
    pub fn from_route_segment(segment: &str) -> BTreeSet<FileType> {
        match segment {
            "documents" => BTreeSet::from([FileType::Document]),
            "images" => BTreeSet::from([FileType::Image]),
            "media" => BTreeSet::from([FileType::Video, FileType::Audio]),
            "others" => BTreeSet::from([FileType::Other]),
            _ => BTreeSet::new(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Document => "document",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(FileType::Image),
            "document" => Ok(FileType::Document),
            "video" => Ok(FileType::Video),
            "audio" => Ok(FileType::Audio),
            "other" => Ok(FileType::Other),
            _ => Err(format!("unknown file type: {}", s)),
        }
    }
}

/// Raw upload as received from the caller.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String) -> Self {
        Self { content, filename }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// What the object store hands back after a successful put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub object_ref: String,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub name: String,
    pub file_type: FileType,
    pub extension: String,
    pub size: u64,
    pub owner: String,
    pub account_id: String,
    pub shared_users: BTreeSet<String>,
    pub object_ref: String,
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Access scope: the owner, or anyone whose email is in the share list.
    pub fn is_accessible_by(&self, user_id: &str, email: &str) -> bool {
        self.owner == user_id || self.shared_users.contains(email)
    }
}
