pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod state;

pub use bootstrap::build_service;
pub use config::{AppConfig, CacheConfig, LoggingConfig, ServerConfig, StorageBackend};
pub use server::{ServerBuilder, StockroomServer, build_app};
pub use state::AppState;
