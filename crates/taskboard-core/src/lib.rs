pub mod config;
pub mod error;
pub mod input;
pub mod result;

pub use config::AppConfig;
pub use error::TaskboardError;
pub use input::TextInput;
pub use result::TaskboardResult;
