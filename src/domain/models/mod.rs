pub mod file;
pub mod storage_usage;
pub mod user;
