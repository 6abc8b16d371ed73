pub mod aggregate;
pub mod app;
pub mod chart;
pub mod config;
pub mod drawer;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod locale;
pub mod models;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod trend;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::Store;
pub use tracker::Tracker;
