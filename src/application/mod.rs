pub mod dto;
pub mod error;
pub mod queries;
pub mod repositories;
pub mod services;
