pub mod backend;
pub mod decode;
pub mod seed;
pub mod service;
pub mod traits;

pub use backend::{HttpTaskApi, InMemoryTaskApi};
pub use service::{MutationOutcome, TaskService};
pub use traits::TaskApi;
