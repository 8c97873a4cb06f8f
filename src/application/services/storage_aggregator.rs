use crate::domain::models::{file::File, storage_usage::StorageUsageSummary};

/// Folds a file set into per-category usage. Capacity is attached to the
/// result but never enforced here.
#[derive(Debug, Clone, Copy)]
pub struct StorageAggregator {
    capacity: u64,
}

impl StorageAggregator {
    pub fn new(capacity: u64) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn summarize<'a, I>(&self, files: I) -> StorageUsageSummary
    where
        I: IntoIterator<Item = &'a File>,
    {
        files
            .into_iter()
            .fold(StorageUsageSummary::empty(self.capacity), |mut summary, file| {
                let usage = summary.categories.entry(file.file_type).or_default();
                usage.size = usage.size.saturating_add(file.size);
                usage.latest_date = usage.latest_date.max(Some(file.created_at));
                summary.used = summary.used.saturating_add(file.size);
                summary
            })
    }
}
