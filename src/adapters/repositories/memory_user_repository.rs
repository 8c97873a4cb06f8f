use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{
        dto::user_dto::NewUserDTO, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::User,
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find<P>(&self, predicate: P) -> Result<Option<User>, ApplicationError>
    where
        P: Fn(&User) -> bool,
    {
        let users = self
            .users
            .read()
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;
        Ok(users.iter().find(|user| predicate(user)).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: NewUserDTO) -> Result<User, ApplicationError> {
        let mut user = user;
        user.sanitize();

        let mut users = self
            .users
            .write()
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(ApplicationError::DocumentStore(format!(
                "duplicate email: {}",
                user.email
            )));
        }

        let created = user.into_user(Uuid::new_v4().to_string());
        users.push(created.clone());
        Ok(created)
    }

    async fn get_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<User>, ApplicationError> {
        self.find(|user| user.account_id == account_id)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        self.find(|user| user.email == email)
    }
}
