use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::models::{
    file::FileType,
    storage_usage::{CategoryUsage, StorageUsageSummary},
};

#[derive(Debug, Serialize)]
pub struct CategoryUsageResponse {
    pub size: u64,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<String>,
}

impl From<CategoryUsage> for CategoryUsageResponse {
    fn from(usage: CategoryUsage) -> Self {
        Self {
            size: usage.size,
            latest_date: usage
                .latest_date
                .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StorageUsageResponse {
    pub image: CategoryUsageResponse,
    pub document: CategoryUsageResponse,
    pub video: CategoryUsageResponse,
    pub audio: CategoryUsageResponse,
    pub other: CategoryUsageResponse,
    pub used: u64,
    #[serde(rename = "all")]
    pub capacity: u64,
    #[serde(rename = "overCapacity")]
    pub over_capacity: bool,
}

impl From<StorageUsageSummary> for StorageUsageResponse {
    fn from(summary: StorageUsageSummary) -> Self {
        Self {
            image: summary.category(FileType::Image).into(),
            document: summary.category(FileType::Document).into(),
            video: summary.category(FileType::Video).into(),
            audio: summary.category(FileType::Audio).into(),
            other: summary.category(FileType::Other).into(),
            used: summary.used,
            capacity: summary.capacity,
            over_capacity: summary.is_over_capacity(),
        }
    }
}
