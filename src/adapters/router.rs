use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::adapters::{
    controllers::{
        file_controller::FileController, health_controller::HealthController,
        storage_controller::StorageController, user_controller::UserController,
    },
    middleware::resolve_current_user,
    state::AppState,
};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development only
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(
    app_state: AppState,
    max_upload_bytes: usize,
    cors_allowed_origins: &[String],
) -> Router {
    // Routes that act on behalf of a resolved user
    let user_routes = Router::new()
        .route(
            "/api/v1/files",
            get(FileController::list_files).post(FileController::upload_file),
        )
        .route(
            "/api/v1/files/{file_id}",
            delete(FileController::delete_file),
        )
        .route(
            "/api/v1/files/{file_id}/name",
            patch(FileController::rename_file),
        )
        .route(
            "/api/v1/files/{file_id}/users",
            put(FileController::update_file_users),
        )
        .route("/api/v1/storage/usage", get(StorageController::get_usage))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            resolve_current_user,
        ));

    let public_routes = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/api/v1/users", post(UserController::create_user));

    Router::new()
        .merge(user_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors_layer(cors_allowed_origins))
        .with_state(app_state)
}
