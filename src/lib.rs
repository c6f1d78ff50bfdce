pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod schedule;
pub mod session;
pub mod state;
pub mod stats;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use config::Config;
pub use state::AppState;
