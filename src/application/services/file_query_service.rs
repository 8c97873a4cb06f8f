use std::{collections::BTreeSet, sync::Arc};

use tracing::{error, info};

use crate::{
    application::{
        error::ApplicationError,
        queries::file_query::{FileQueryBuilder, DEFAULT_SORT},
        repositories::file_repository::FileRepository,
        services::storage_aggregator::StorageAggregator,
    },
    domain::models::{
        file::{File, FileType},
        storage_usage::StorageUsageSummary,
        user::User,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListFilesParams {
    pub types: BTreeSet<FileType>,
    pub search_text: String,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

/// Read side: access-scoped listing and usage summaries.
#[derive(Clone)]
pub struct FileQueryService {
    file_repository: Arc<dyn FileRepository>,
    aggregator: StorageAggregator,
}

impl FileQueryService {
    pub fn new(file_repository: Arc<dyn FileRepository>, aggregator: StorageAggregator) -> Self {
        Self {
            file_repository,
            aggregator,
        }
    }

    pub async fn list_files(
        &self,
        current_user: &User,
        params: &ListFilesParams,
    ) -> Result<Vec<File>, ApplicationError> {
        let sort = params
            .sort
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT);

        let query = FileQueryBuilder::build(
            current_user,
            &params.types,
            &params.search_text,
            sort,
            params.limit,
        );

        self.file_repository.list_files(&query).await.map_err(|e| {
            error!("Error getting files for user {}: {}", current_user.id, e);
            e
        })
    }

    pub async fn storage_usage(
        &self,
        current_user: &User,
    ) -> Result<StorageUsageSummary, ApplicationError> {
        let files = self
            .list_files(current_user, &ListFilesParams::default())
            .await?;
        let summary = self.aggregator.summarize(&files);

        info!(
            "Storage usage for user {}: {} of {} bytes",
            current_user.id, summary.used, summary.capacity
        );
        Ok(summary)
    }
}
