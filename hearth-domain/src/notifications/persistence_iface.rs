use async_trait::async_trait;

use super::errors::NotificationError;
use super::types::{Notification, NotificationSettings};

/// Persistence capability for the notification store's two records.
///
/// Absence of a record is not an error: providers return the documented
/// defaults (empty collection, default settings). A present-but-unreadable
/// record is an error; the store reacts by resetting both collections.
#[async_trait]
pub trait NotificationPersistenceProvider: Send + Sync {
    async fn load_notifications(&self) -> Result<Vec<Notification>, NotificationError>;
    async fn save_notifications(
        &self,
        notifications: &[Notification],
    ) -> Result<(), NotificationError>;
    async fn load_settings(&self) -> Result<NotificationSettings, NotificationError>;
    async fn save_settings(&self, settings: &NotificationSettings)
        -> Result<(), NotificationError>;
}
