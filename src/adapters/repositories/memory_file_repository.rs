use std::{cmp::Ordering, sync::RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

use crate::{
    application::{
        dto::file_dto::{FileUpdateDTO, NewFileDTO},
        error::ApplicationError,
        queries::file_query::{FileField, FileQuery, Filter, SortDirection},
        repositories::file_repository::FileRepository,
    },
    domain::models::file::File,
};

#[derive(Default)]
struct State {
    files: Vec<File>,
    last_created_at: Option<DateTime<Utc>>,
}

/// In-process document store. Evaluates the same filter set the Postgres
/// adapter translates to SQL.
#[derive(Default)]
pub struct MemoryFileRepository {
    state: RwLock<State>,
}

impl MemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, unscoped. For diagnostics and tests.
    pub fn snapshot(&self) -> Vec<File> {
        self.state
            .read()
            .map(|state| state.files.clone())
            .unwrap_or_default()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> ApplicationError {
    ApplicationError::DocumentStore(e.to_string())
}

fn field_text(file: &File, field: FileField) -> String {
    match field {
        FileField::Id => file.id.clone(),
        FileField::Name => file.name.clone(),
        FileField::Type => file.file_type.as_str().to_string(),
        FileField::Extension => file.extension.clone(),
        FileField::Size => file.size.to_string(),
        FileField::Owner => file.owner.clone(),
        FileField::SharedUsers => file
            .shared_users
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(","),
        FileField::CreatedAt => file.created_at.to_rfc3339(),
    }
}

fn matches(file: &File, filter: &Filter) -> bool {
    match filter {
        Filter::Equals(FileField::SharedUsers, value)
        | Filter::Contains(FileField::SharedUsers, value) => file.shared_users.contains(value),
        Filter::Equals(field, value) => field_text(file, *field) == *value,
        Filter::Contains(field, value) => field_text(file, *field).contains(value.as_str()),
        Filter::SetMembership(field, values) => values.contains(&field_text(file, *field)),
        Filter::And(filters) => filters.iter().all(|f| matches(file, f)),
        Filter::Or(filters) => filters.iter().any(|f| matches(file, f)),
    }
}

fn compare(a: &File, b: &File, field: FileField) -> Ordering {
    match field {
        FileField::Size => a.size.cmp(&b.size),
        FileField::CreatedAt => a.created_at.cmp(&b.created_at),
        FileField::Type => a.file_type.as_str().cmp(b.file_type.as_str()),
        other => field_text(a, other).cmp(&field_text(b, other)),
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn create_file(&self, file: NewFileDTO) -> Result<File, ApplicationError> {
        let mut state = self.state.write().map_err(lock_error)?;

        let now = Utc::now().trunc_subsecs(3);
        let created_at = match state.last_created_at {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        state.last_created_at = Some(created_at);

        let created = File {
            id: Uuid::new_v4().to_string(),
            name: file.name,
            file_type: file.file_type,
            extension: file.extension,
            size: file.size,
            owner: file.owner,
            account_id: file.account_id,
            shared_users: file.shared_users,
            object_ref: file.object_ref,
            created_at,
        };
        state.files.push(created.clone());
        Ok(created)
    }

    async fn get_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .files
            .iter()
            .find(|file| file.id == file_id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn update_file(&self, update: FileUpdateDTO) -> Result<File, ApplicationError> {
        let mut state = self.state.write().map_err(lock_error)?;
        let file = state
            .files
            .iter_mut()
            .find(|file| file.id == update.file_id)
            .ok_or(ApplicationError::NotFound)?;

        if let Some(name) = update.name {
            file.name = name;
        }
        if let Some(shared_users) = update.shared_users {
            file.shared_users = shared_users;
        }
        Ok(file.clone())
    }

    async fn delete_file(&self, file_id: &str) -> Result<File, ApplicationError> {
        let mut state = self.state.write().map_err(lock_error)?;
        let index = state
            .files
            .iter()
            .position(|file| file.id == file_id)
            .ok_or(ApplicationError::NotFound)?;
        Ok(state.files.remove(index))
    }

    async fn list_files(&self, query: &FileQuery) -> Result<Vec<File>, ApplicationError> {
        let order_by = query.order_by();
        let sort_field = FileField::from_sort_key(&order_by.field).ok_or_else(|| {
            ApplicationError::DocumentStore(format!(
                "Invalid query: attribute not found in schema: {}",
                order_by.field
            ))
        })?;

        let state = self.state.read().map_err(lock_error)?;
        let mut files: Vec<File> = state
            .files
            .iter()
            .filter(|file| matches(file, query.filter()))
            .cloned()
            .collect();

        files.sort_by(|a, b| match order_by.direction {
            SortDirection::Asc => compare(a, b, sort_field),
            SortDirection::Desc => compare(b, a, sort_field),
        });

        if let Some(limit) = query.limit() {
            files.truncate(limit as usize);
        }
        Ok(files)
    }
}
