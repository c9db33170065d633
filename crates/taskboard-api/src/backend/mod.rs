pub mod http_api;
pub mod memory_api;

pub use http_api::HttpTaskApi;
pub use memory_api::InMemoryTaskApi;
