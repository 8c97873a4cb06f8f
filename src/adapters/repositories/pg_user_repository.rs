use async_trait::async_trait;
use sqlx::query_as;

use crate::{
    application::{
        dto::user_dto::NewUserDTO, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::User,
};

pub struct PgUserRepository {
    pool: sqlx::PgPool,
}

impl PgUserRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: NewUserDTO) -> Result<User, ApplicationError> {
        let mut user = user;
        user.sanitize();

        let query = r#"
            INSERT INTO application.users (full_name, email, avatar, account_id, is_admin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        "#;
        let new_user = user.into_user(String::new());

        let created_user: User = query_as::<_, User>(query)
            .bind(&new_user.full_name)
            .bind(&new_user.email)
            .bind(&new_user.avatar)
            .bind(&new_user.account_id)
            .bind(new_user.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;
        Ok(created_user)
    }

    async fn get_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE account_id = $1 LIMIT 1";
        query_as::<_, User>(query)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE email = $1 LIMIT 1";
        query_as::<_, User>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))
    }
}
