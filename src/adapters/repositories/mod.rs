mod memory_file_repository;
mod memory_user_repository;
mod pg_file_repository;
mod pg_user_repository;

pub use memory_file_repository::MemoryFileRepository;
pub use memory_user_repository::MemoryUserRepository;
pub use pg_file_repository::PgFileRepository;
pub use pg_user_repository::PgUserRepository;
