//! Error types for the logging subsystem

use thiserror::Error;

/// Errors raised while installing the global subscriber
#[derive(Debug, Clone, Error)]
pub enum LoggingError {
    /// A subscriber was already installed, or the filter could not be built
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// Bad level or filter directive
    #[error("Invalid logging configuration: {0}")]
    InvalidConfiguration(String),
}
