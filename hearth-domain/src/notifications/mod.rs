// Core notification logic, types, and services.

pub mod delivery;
pub mod errors;
pub mod events;
pub mod persistence; // Storage-backed implementation of persistence
pub mod persistence_iface; // Persistence capability for the two records
pub mod service; // The NotificationStore trait and its impl
pub mod types;

// Re-exports for consumers of this module.
pub use delivery::{
    AlertDispatcher, DeliveryError, DenyAllPermissionBroker, EmailSender,
    GrantAllPermissionBroker, LoggingEmailSender, NullAlertDispatcher, PermissionBroker,
    PermissionDecision,
};
pub use errors::NotificationError;
pub use events::NotificationEvent;
pub use persistence::{StorageNotificationPersistenceProvider, NOTIFICATIONS_KEY, SETTINGS_KEY};
pub use persistence_iface::NotificationPersistenceProvider;
pub use service::{DefaultNotificationStore, NotificationStore};
pub use types::{
    default_categories, CalendarEventSnapshot, InventoryItemSnapshot, Notification,
    NotificationChannel, NotificationInput, NotificationPriority, NotificationSettings,
    NotificationSettingsUpdate,
};
