pub mod app;
pub mod catalog;
pub mod dietzies;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod passes;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use catalog::Catalog;
pub use state::AppState;
pub use storage::{load_data, persist_data, resolve_data_path};
