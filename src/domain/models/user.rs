use serde::{Deserialize, Serialize};

pub const AVATAR_PLACEHOLDER_URL: &str =
    "https://cdn.icon-icons.com/icons2/2643/PNG/512/male_boy_person_people_avatar_icon_159358.png";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// Only drives UI affordances; never consulted for access decisions.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
