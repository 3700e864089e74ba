pub mod json_store;
pub mod mem_store;
pub mod store;
