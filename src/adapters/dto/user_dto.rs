use sqlx::{postgres::PgRow, FromRow, Row};

use crate::domain::models::user::User;

impl FromRow<'_, PgRow> for User {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            avatar: row.try_get("avatar")?,
            account_id: row.try_get("account_id")?,
            is_admin: row.try_get("is_admin")?,
        })
    }
}
