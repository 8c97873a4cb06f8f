use std::collections::BTreeSet;

use sqlx::{postgres::PgRow, FromRow, Row};

use crate::{
    application::dto::file_dto::NewFileDTO,
    domain::models::file::{File, FileType},
};

impl FromRow<'_, PgRow> for File {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        let file_type: String = row.try_get("type")?;
        let shared_users: Vec<String> = row.try_get("shared_users")?;

        Ok(File {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            // Unrecognised categories are accounted as "other".
            file_type: file_type.parse().unwrap_or(FileType::Other),
            extension: row.try_get("extension")?,
            size: size.max(0) as u64,
            owner: row.try_get("owner")?,
            account_id: row.try_get("account_id")?,
            shared_users: shared_users.into_iter().collect::<BTreeSet<_>>(),
            object_ref: row.try_get("object_ref")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl NewFileDTO {
    pub fn sanitize(&mut self) {
        self.size = std::cmp::min(self.size, i64::MAX as u64);
    }
}
