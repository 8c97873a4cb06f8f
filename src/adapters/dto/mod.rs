pub mod file_dto;
pub mod file_record_dto;
pub mod storage_dto;
pub mod user_dto;
