//! Infrastructure layer for database connections, configuration and logging
//!
//! Provides the SQLite-backed shell repository, connection/pool management,
//! configuration loading, and tracing initialization.

pub mod config;
pub mod database_connection;
pub mod logging;
pub mod shell_repository;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager};
pub use database_connection::DatabaseConnection;
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use shell_repository::SqliteShellRepository;
