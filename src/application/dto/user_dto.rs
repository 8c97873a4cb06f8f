use serde::{Deserialize, Serialize};

use crate::domain::models::user::{User, AVATAR_PLACEHOLDER_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserDTO {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl NewUserDTO {
    pub fn sanitize(&mut self) {
        self.full_name = self.full_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.account_id = self.account_id.trim().to_string();
    }

    /// Builds the record a store would persist, minus the store-assigned id.
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            avatar: self
                .avatar
                .unwrap_or_else(|| AVATAR_PLACEHOLDER_URL.to_string()),
            account_id: self.account_id,
            is_admin: false,
        }
    }
}
