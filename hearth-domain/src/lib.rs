//! Domain layer for the Hearth household management application.
//!
//! This crate owns the notification store: the single authoritative holder
//! of the notification feed and the user's notification preferences. Pages
//! of the application (tasks, shopping, calendar, finance, inventory)
//! register domain events with the store; the store decides whether to
//! materialize a notification, persists its state through an injected
//! key-value storage capability, and optionally triggers platform-level
//! alerts or an email dispatch.
//!
//! The composition root constructs exactly one [`DefaultNotificationStore`]
//! per running application and passes it to callers; there is no global
//! accessor. Persistence and delivery are capability traits
//! ([`NotificationPersistenceProvider`], [`PermissionBroker`],
//! [`AlertDispatcher`], [`EmailSender`]) so the store is testable with
//! in-memory fakes.

// Re-export core module
pub use hearth_core as core;

pub mod notifications;

// Re-export common types and interfaces
pub use notifications::{
    AlertDispatcher, CalendarEventSnapshot, DefaultNotificationStore, EmailSender,
    InventoryItemSnapshot, Notification, NotificationChannel, NotificationError,
    NotificationEvent, NotificationInput, NotificationPersistenceProvider, NotificationPriority,
    NotificationSettings, NotificationSettingsUpdate, NotificationStore, PermissionBroker,
    StorageNotificationPersistenceProvider,
};
