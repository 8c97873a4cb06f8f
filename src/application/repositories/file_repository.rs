use async_trait::async_trait;

use crate::{
    application::{
        dto::file_dto::{FileUpdateDTO, NewFileDTO},
        error::ApplicationError,
        queries::file_query::FileQuery,
    },
    domain::models::file::File,
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_file(&self, file: NewFileDTO) -> Result<File, ApplicationError>;
    async fn get_file(&self, file_id: &str) -> Result<File, ApplicationError>;
    async fn update_file(&self, update: FileUpdateDTO) -> Result<File, ApplicationError>;
    async fn delete_file(&self, file_id: &str) -> Result<File, ApplicationError>;
    async fn list_files(&self, query: &FileQuery) -> Result<Vec<File>, ApplicationError>;
}
