pub mod app;
pub mod components;
pub mod dialog;
pub mod events;
pub mod selection;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::{run, App, AppMode};
pub use events::{ApiOutcome, Event};
