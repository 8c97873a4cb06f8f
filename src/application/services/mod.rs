pub mod file_mutation_service;
pub mod file_query_service;
pub mod object_store;
pub mod storage_aggregator;
pub mod upload_coordinator;
pub mod view_invalidator;
