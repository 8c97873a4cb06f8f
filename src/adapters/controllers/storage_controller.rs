use axum::{extract::State, Extension, Json};

use crate::{
    adapters::{dto::storage_dto::StorageUsageResponse, middleware::CurrentUser},
    application::{error::ApplicationError, services::file_query_service::FileQueryService},
};

pub struct StorageController;

impl StorageController {
    /// GET /api/v1/storage/usage
    pub async fn get_usage(
        State(query_service): State<FileQueryService>,
        Extension(CurrentUser(user)): Extension<CurrentUser>,
    ) -> Result<Json<StorageUsageResponse>, ApplicationError> {
        let summary = query_service.storage_usage(&user).await?;
        Ok(Json(summary.into()))
    }
}
