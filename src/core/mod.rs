//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod formatters;
pub mod logging;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use formatters::time_to_seconds;
pub use logging::init_logger;
