use async_trait::async_trait;
use sqlx::{query_as, Postgres, QueryBuilder};

use crate::{
    application::{
        dto::file_dto::{FileUpdateDTO, NewFileDTO},
        error::ApplicationError,
        queries::file_query::{FileField, FileQuery, Filter, SortDirection},
        repositories::file_repository::FileRepository,
    },
    domain::models::file::File,
};

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn column(field: FileField) -> &'static str {
    match field {
        FileField::Id => "id",
        FileField::Name => "name",
        FileField::Type => "type",
        FileField::Extension => "extension",
        FileField::Size => "size",
        FileField::Owner => "owner",
        FileField::SharedUsers => "shared_users",
        FileField::CreatedAt => "created_at",
    }
}

/// Text view of a column, for comparisons against bound string values.
fn text_expr(field: FileField) -> &'static str {
    match field {
        FileField::Size => "size::text",
        FileField::CreatedAt => "created_at::text",
        other => column(other),
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Equals(FileField::SharedUsers, value)
        | Filter::Contains(FileField::SharedUsers, value) => {
            builder.push_bind(value.clone());
            builder.push(" = ANY(shared_users)");
        }
        Filter::Equals(field, value) => {
            builder.push(text_expr(*field));
            builder.push(" = ");
            builder.push_bind(value.clone());
        }
        Filter::Contains(field, value) => {
            builder.push("strpos(");
            builder.push(text_expr(*field));
            builder.push(", ");
            builder.push_bind(value.clone());
            builder.push(") > 0");
        }
        Filter::SetMembership(field, values) => {
            builder.push(text_expr(*field));
            builder.push(" = ANY(");
            builder.push_bind(values.clone());
            builder.push(")");
        }
        Filter::And(filters) => push_group(builder, filters, " AND ", "TRUE"),
        Filter::Or(filters) => push_group(builder, filters, " OR ", "FALSE"),
    }
}

fn push_group(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &[Filter],
    separator: &str,
    identity: &str,
) {
    if filters.is_empty() {
        builder.push(identity);
        return;
    }

    builder.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, filter);
    }
    builder.push(")");
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create_file(&self, file: NewFileDTO) -> Result<File, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = r#"
            INSERT INTO application.files (
                name, type, extension, size, owner,
                account_id, shared_users, object_ref
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        "#;

        let shared_users: Vec<String> = file.shared_users.into_iter().collect();

        let created: File = query_as::<_, File>(query)
            .bind(&file.name)
            .bind(file.file_type.as_str())
            .bind(&file.extension)
            .bind(file.size as i64)
            .bind(&file.owner)
            .bind(&file.account_id)
            .bind(&shared_users)
            .bind(&file.object_ref)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;

        Ok(created)
    }

    async fn get_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        let query = "SELECT * FROM application.files WHERE id = $1";

        query_as::<_, File>(query)
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?
            .ok_or(ApplicationError::NotFound)
    }

    async fn update_file(&self, update: FileUpdateDTO) -> Result<File, ApplicationError> {
        if update.is_empty() {
            return self.get_file(&update.file_id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE application.files SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = &update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(shared_users) = &update.shared_users {
            separated.push("shared_users = ");
            separated.push_bind_unseparated(shared_users.iter().cloned().collect::<Vec<_>>());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(update.file_id.clone());
        builder.push(" RETURNING *");

        builder
            .build_query_as::<File>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        let query = "DELETE FROM application.files WHERE id = $1 RETURNING *";

        query_as::<_, File>(query)
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?
            .ok_or(ApplicationError::NotFound)
    }

    async fn list_files(&self, query: &FileQuery) -> Result<Vec<File>, ApplicationError> {
        let order_by = query.order_by();
        let sort_field = FileField::from_sort_key(&order_by.field).ok_or_else(|| {
            ApplicationError::DocumentStore(format!(
                "Invalid query: attribute not found in schema: {}",
                order_by.field
            ))
        })?;

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM application.files WHERE ");
        push_filter(&mut builder, query.filter());

        builder.push(" ORDER BY ");
        builder.push(column(sort_field));
        builder.push(match order_by.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });

        if let Some(limit) = query.limit() {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }

        builder
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))
    }
}
