use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{error, info, warn};

use crate::{
    adapters::{
        dto::file_dto::{
            DeleteFileQuery, FileResponse, ListFilesQuery, ListFilesResponse, RenameFileRequest,
            UpdateFileUsersRequest,
        },
        middleware::CurrentUser,
        state::AppState,
    },
    application::{
        error::{ApplicationError, SagaOutcome},
        services::{
            file_mutation_service::FileMutationService,
            file_query_service::{FileQueryService, ListFilesParams},
            object_store::ObjectStore,
        },
    },
    domain::models::file::{FileData, FileType},
};

const DEFAULT_VIEW_PATH: &str = "/";

pub struct FileController;

impl FileController {
    /// GET /api/v1/files?type=&query=&sort=&limit=
    pub async fn list_files(
        State(query_service): State<FileQueryService>,
        State(object_store): State<Arc<dyn ObjectStore>>,
        Extension(CurrentUser(user)): Extension<CurrentUser>,
        Query(params): Query<ListFilesQuery>,
    ) -> Result<Json<ListFilesResponse>, ApplicationError> {
        let params = ListFilesParams {
            types: params
                .file_type
                .as_deref()
                .map(FileType::from_route_segment)
                .unwrap_or_default(),
            search_text: params.query.unwrap_or_default(),
            sort: params.sort,
            limit: params.limit,
        };

        let files = query_service.list_files(&user, &params).await?;
        let total_size = files.iter().map(|f| f.size).sum();

        let documents: Vec<FileResponse> = files
            .into_iter()
            .map(|file| {
                let url = object_store.object_url(&file.object_ref);
                FileResponse::new(file, url)
            })
            .collect();

        Ok(Json(ListFilesResponse {
            total: documents.len(),
            total_size,
            documents,
        }))
    }

    /// POST /api/v1/files, multipart with a `file` part and an optional `path`.
    pub async fn upload_file(
        State(app_state): State<AppState>,
        Extension(CurrentUser(user)): Extension<CurrentUser>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let mut file_bytes: Option<Vec<u8>> = None;
        let mut filename: Option<String> = None;
        let mut path: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::Validation("invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    if filename.is_none() {
                        filename = field.file_name().map(str::to_string);
                    }
                    file_bytes = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| {
                                warn!("Cannot read file bytes: {}", e);
                                ApplicationError::Validation("invalid file data".to_string())
                            })?
                            .to_vec(),
                    );
                }
                "filename" => {
                    filename = Some(field.text().await.map_err(|e| {
                        warn!("Invalid filename field: {}", e);
                        ApplicationError::Validation("invalid filename".to_string())
                    })?);
                }
                "path" => {
                    path = Some(field.text().await.map_err(|e| {
                        warn!("Invalid path field: {}", e);
                        ApplicationError::Validation("invalid path".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let file_bytes = file_bytes.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::Validation("missing required field 'file'".to_string())
        })?;
        let filename = filename.ok_or_else(|| {
            warn!("Missing file name in upload");
            ApplicationError::Validation("missing file name".to_string())
        })?;

        info!(
            "Uploading '{}' ({} bytes) for user {}",
            filename,
            file_bytes.len(),
            user.id
        );

        let outcome = app_state
            .upload_coordinator
            .upload(
                FileData::new(file_bytes, filename),
                &user.id,
                &user.account_id,
                path.as_deref().unwrap_or(DEFAULT_VIEW_PATH),
            )
            .await;

        if let SagaOutcome::UncompensatedFailure {
            orphaned_object, ..
        } = &outcome
        {
            error!(orphaned_object = %orphaned_object, "Upload left an orphaned object");
        }

        let file = outcome.into_result()?;
        let url = app_state.object_store.object_url(&file.object_ref);
        Ok((StatusCode::CREATED, Json(FileResponse::new(file, url))))
    }

    /// PATCH /api/v1/files/{file_id}/name
    pub async fn rename_file(
        State(mutation_service): State<FileMutationService>,
        State(object_store): State<Arc<dyn ObjectStore>>,
        Path(file_id): Path<String>,
        Json(body): Json<RenameFileRequest>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let file = mutation_service
            .rename(
                &file_id,
                &body.name,
                &body.extension,
                body.path.as_deref().unwrap_or(DEFAULT_VIEW_PATH),
            )
            .await?;

        let url = object_store.object_url(&file.object_ref);
        Ok(Json(FileResponse::new(file, url)))
    }

    /// PUT /api/v1/files/{file_id}/users
    pub async fn update_file_users(
        State(mutation_service): State<FileMutationService>,
        State(object_store): State<Arc<dyn ObjectStore>>,
        Path(file_id): Path<String>,
        Json(body): Json<UpdateFileUsersRequest>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let file = mutation_service
            .update_sharing(
                &file_id,
                body.emails,
                body.path.as_deref().unwrap_or(DEFAULT_VIEW_PATH),
            )
            .await?;

        let url = object_store.object_url(&file.object_ref);
        Ok(Json(FileResponse::new(file, url)))
    }

    /// DELETE /api/v1/files/{file_id}
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(params): Query<DeleteFileQuery>,
    ) -> Result<StatusCode, ApplicationError> {
        let file = app_state.file_repository.get_file(&file_id).await?;

        app_state
            .file_mutation_service
            .delete(
                &file.id,
                &file.object_ref,
                params.path.as_deref().unwrap_or(DEFAULT_VIEW_PATH),
            )
            .await
            .into_result()?;

        Ok(StatusCode::NO_CONTENT)
    }
}
