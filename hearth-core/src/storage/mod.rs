//! Key-value storage capability for Hearth.
//!
//! The domain layer persists its records as JSON strings under fixed keys.
//! This module defines the [`StorageService`] trait that abstracts the
//! backing store, together with two implementations:
//!
//! - [`FilesystemStorageService`]: one file per key under a data directory;
//!   the production backend.
//! - [`InMemoryStorageService`]: a `HashMap` behind a lock; used by tests
//!   and ephemeral setups.
//!
//! Absence of a key is not an error: `read_value` returns `Ok(None)` and
//! `remove_value` is a no-op for keys that were never written.

pub mod filesystem;
pub mod memory;

use async_trait::async_trait;

use crate::error::CoreError;

/// Asynchronous key-value storage capability.
///
/// Implementations must be safe to share across tasks (`Send + Sync`);
/// callers typically hold them behind an `Arc<dyn StorageService>`.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    async fn read_value(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn write_value(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Removes the value stored under `key`. Absent keys are a no-op.
    async fn remove_value(&self, key: &str) -> Result<(), CoreError>;
}

pub use filesystem::FilesystemStorageService;
pub use memory::InMemoryStorageService;
