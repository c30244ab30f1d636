pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::resolve_addr;
pub use state::AppState;
pub use store::EntryStore;
