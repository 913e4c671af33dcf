pub mod app;
pub mod assistant;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod metrics;
pub mod models;
pub mod sop;
pub mod stats;
pub mod storage;
pub mod state;
pub mod submission;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
