pub mod app;
pub mod config;
pub mod errors;
pub mod game;
pub mod handlers;
pub mod models;
pub mod panels;
pub mod persistence;
pub mod score;
pub mod session;
pub mod state;
pub mod storage;
pub mod summary;
pub mod timer;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::AppConfig;
pub use persistence::{KeyValueStore, MemoryStore, PersistenceBridge};
pub use session::Tracker;
pub use state::AppState;
pub use storage::JsonFileStore;
