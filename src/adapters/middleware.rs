use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    application::{error::ApplicationError, repositories::user_repository::UserRepository},
    domain::models::user::User,
};

pub const ACCOUNT_ID_HEADER: &str = "X-Account-Id";

/// The user resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolves the `X-Account-Id` header to a user record and stores it as a
/// request extension. Requests without a resolvable user are rejected.
pub async fn resolve_current_user(
    State(user_repo): State<Arc<dyn UserRepository>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApplicationError> {
    let account_id = request
        .headers()
        .get(ACCOUNT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("{} header is missing or invalid", ACCOUNT_ID_HEADER);
            ApplicationError::AuthResolution
        })?;

    let user = user_repo
        .get_user_by_account_id(&account_id)
        .await?
        .ok_or_else(|| {
            warn!("No user found for account {}", account_id);
            ApplicationError::AuthResolution
        })?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
