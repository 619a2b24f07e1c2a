//! # Hearth Core Library (`hearth-core`)
//!
//! `hearth-core` is the foundational library for the Hearth household
//! management application. It provides the infrastructure the domain layer
//! builds on:
//!
//! - **Error Handling**: a unified error type through the [`CoreError`] enum.
//! - **Storage**: the [`StorageService`] key-value capability with filesystem
//!   and in-memory implementations, used by the domain layer to persist its
//!   records.
//! - **Logging**: structured logging built on the `tracing` crate, with a
//!   minimal initializer suitable for application startup and tests.
//!
//! Key components are re-exported at the crate root for ease of use.

pub mod error;
pub mod logging;
pub mod storage;

pub use error::CoreError;
pub use storage::{FilesystemStorageService, InMemoryStorageService, StorageService};
