//! Error handling for the Hearth core layer.
//!
//! This module defines the error types used throughout the core layer with
//! the `thiserror` crate. The main error type is [`CoreError`], which the
//! storage and logging subsystems return and which upper layers wrap into
//! their own error enums.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Hearth application.
///
/// This enum represents all failures that can originate in the core layer.
/// It is designed to be used as a common error type throughout the
/// application, often by wrapping more specific error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A storage operation against the key-value backend failed.
    /// Includes the operation name, the record key, and the source I/O error.
    #[error("Storage error during '{operation}' for key '{key}': {source}")]
    Storage {
        operation: String,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation outside of keyed record access failed,
    /// such as creating the data directory.
    #[error("Filesystem error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by the more specific variants.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors that occur during the initialization of the logging system.
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),

    /// Errors due to invalid input provided to a core function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
