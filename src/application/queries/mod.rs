pub mod file_query;
