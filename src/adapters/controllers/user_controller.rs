use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    application::{
        dto::user_dto::NewUserDTO, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::User,
};

pub struct UserController;

impl UserController {
    /// POST /api/v1/users
    /// Registers the user record for an account. Idempotent on email: an
    /// existing record is returned unchanged.
    pub async fn create_user(
        State(user_repo): State<Arc<dyn UserRepository>>,
        Json(body): Json<NewUserDTO>,
    ) -> Result<(StatusCode, Json<User>), ApplicationError> {
        let mut user_dto = body;
        user_dto.sanitize();

        if user_dto.full_name.is_empty() {
            return Err(ApplicationError::Validation(
                "fullName is required".to_string(),
            ));
        }
        if !user_dto.email.contains('@') {
            return Err(ApplicationError::Validation(
                "a valid email is required".to_string(),
            ));
        }
        if user_dto.account_id.is_empty() {
            return Err(ApplicationError::Validation(
                "accountId is required".to_string(),
            ));
        }

        if let Some(existing) = user_repo.get_user_by_email(&user_dto.email).await? {
            info!("User already registered for {}", existing.email);
            return Ok((StatusCode::OK, Json(existing)));
        }

        let user = user_repo.create_user(user_dto).await?;
        info!("Registered user {} for account {}", user.id, user.account_id);
        Ok((StatusCode::CREATED, Json(user)))
    }
}
