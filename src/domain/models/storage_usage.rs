use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::file::FileType;

/// 2 GiB, the default informational quota ceiling.
pub const DEFAULT_CAPACITY_BYTES: u64 = 2 * 1024 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub size: u64,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<DateTime<Utc>>,
}

/// Per-category usage plus the grand total. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageUsageSummary {
    pub categories: BTreeMap<FileType, CategoryUsage>,
    pub used: u64,
    pub capacity: u64,
}

impl StorageUsageSummary {
    /// A summary with every category present and zeroed.
    pub fn empty(capacity: u64) -> Self {
        Self {
            categories: FileType::ALL
                .into_iter()
                .map(|file_type| (file_type, CategoryUsage::default()))
                .collect(),
            used: 0,
            capacity,
        }
    }

    pub fn category(&self, file_type: FileType) -> CategoryUsage {
        self.categories.get(&file_type).copied().unwrap_or_default()
    }

    pub fn is_over_capacity(&self) -> bool {
        self.used > self.capacity
    }
}
