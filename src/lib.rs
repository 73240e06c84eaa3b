// complaints-service/src/lib.rs
//! Record-tracking core for an internet complaints desk: team-member
//! accounts, complaint records, and the document-store gateway behind them.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;


pub use config::ServiceConfig;
pub use models::ServiceError;
pub use utils::Database;

/// Initialise `env_logger`, defaulting to `info` unless `RUST_LOG` says
/// otherwise. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
