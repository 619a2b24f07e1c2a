use hearth_core::error::CoreError;
use thiserror::Error;

/// Errors produced inside the notification subsystem.
///
/// These travel between the persistence provider and the store; the store
/// itself logs them and degrades rather than surfacing them through its
/// public operations.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Persistence error during operation '{operation}': {message}")]
    PersistenceError {
        operation: String,
        message: String,
        #[source]
        source: CoreError,
    },

    #[error("Serialization error for record '{key}': {source}")]
    SerializationError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization error for record '{key}': {source}")]
    DeserializationError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal notification error: {0}")]
    InternalError(String),
}

impl NotificationError {
    pub fn persistence_error_from_core(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: CoreError,
    ) -> Self {
        NotificationError::PersistenceError {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}
