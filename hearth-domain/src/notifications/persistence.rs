use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hearth_core::storage::StorageService;

use super::errors::NotificationError;
use super::persistence_iface::NotificationPersistenceProvider;
use super::types::{Notification, NotificationSettings};

/// Default storage key for the notification collection.
pub const NOTIFICATIONS_KEY: &str = "notifications";
/// Default storage key for the settings record.
pub const SETTINGS_KEY: &str = "notification_settings";

const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct VersionedNotifications<'a> {
    version: u32,
    notifications: &'a [Notification],
}

// Data persisted before the version tag existed is a bare JSON array /
// settings object; both forms must keep loading as the current schema.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNotifications {
    Versioned {
        version: u32,
        notifications: Vec<Notification>,
    },
    Legacy(Vec<Notification>),
}

#[derive(Serialize)]
struct VersionedSettings<'a> {
    version: u32,
    settings: &'a NotificationSettings,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSettings {
    Versioned {
        version: u32,
        settings: NotificationSettings,
    },
    Legacy(NotificationSettings),
}

/// [`NotificationPersistenceProvider`] over a key-value [`StorageService`].
///
/// The two records are stored as JSON under fixed keys, wrapped in a
/// versioned envelope for future migration.
pub struct StorageNotificationPersistenceProvider {
    storage: Arc<dyn StorageService>,
    notifications_key: String,
    settings_key: String,
}

impl StorageNotificationPersistenceProvider {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self::with_keys(storage, NOTIFICATIONS_KEY, SETTINGS_KEY)
    }

    pub fn with_keys(
        storage: Arc<dyn StorageService>,
        notifications_key: impl Into<String>,
        settings_key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            notifications_key: notifications_key.into(),
            settings_key: settings_key.into(),
        }
    }
}

#[async_trait]
impl NotificationPersistenceProvider for StorageNotificationPersistenceProvider {
    async fn load_notifications(&self) -> Result<Vec<Notification>, NotificationError> {
        match self.storage.read_value(&self.notifications_key).await {
            Ok(Some(content)) => match serde_json::from_str::<StoredNotifications>(&content) {
                Ok(StoredNotifications::Versioned {
                    version,
                    notifications,
                }) => {
                    debug!(
                        "loaded {} notifications (schema v{})",
                        notifications.len(),
                        version
                    );
                    Ok(notifications)
                }
                Ok(StoredNotifications::Legacy(notifications)) => {
                    debug!(
                        "loaded {} notifications from unversioned payload",
                        notifications.len()
                    );
                    Ok(notifications)
                }
                Err(e) => {
                    warn!(
                        "failed to deserialize notifications under key '{}': {}",
                        self.notifications_key, e
                    );
                    Err(NotificationError::DeserializationError {
                        key: self.notifications_key.clone(),
                        source: e,
                    })
                }
            },
            Ok(None) => {
                debug!(
                    "no stored notifications under key '{}', starting empty",
                    self.notifications_key
                );
                Ok(Vec::new())
            }
            Err(core_error) => Err(NotificationError::persistence_error_from_core(
                "load_notifications",
                format!("failed to read key '{}'", self.notifications_key),
                core_error,
            )),
        }
    }

    async fn save_notifications(
        &self,
        notifications: &[Notification],
    ) -> Result<(), NotificationError> {
        let envelope = VersionedNotifications {
            version: SCHEMA_VERSION,
            notifications,
        };
        let payload = serde_json::to_string(&envelope).map_err(|e| {
            NotificationError::SerializationError {
                key: self.notifications_key.clone(),
                source: e,
            }
        })?;
        self.storage
            .write_value(&self.notifications_key, &payload)
            .await
            .map_err(|core_error| {
                NotificationError::persistence_error_from_core(
                    "save_notifications",
                    format!("failed to write key '{}'", self.notifications_key),
                    core_error,
                )
            })?;
        debug!(
            "saved {} notifications under key '{}'",
            notifications.len(),
            self.notifications_key
        );
        Ok(())
    }

    async fn load_settings(&self) -> Result<NotificationSettings, NotificationError> {
        match self.storage.read_value(&self.settings_key).await {
            Ok(Some(content)) => match serde_json::from_str::<StoredSettings>(&content) {
                Ok(StoredSettings::Versioned { version, settings }) => {
                    debug!("loaded notification settings (schema v{})", version);
                    Ok(settings)
                }
                Ok(StoredSettings::Legacy(settings)) => {
                    debug!("loaded notification settings from unversioned payload");
                    Ok(settings)
                }
                Err(e) => {
                    warn!(
                        "failed to deserialize settings under key '{}': {}",
                        self.settings_key, e
                    );
                    Err(NotificationError::DeserializationError {
                        key: self.settings_key.clone(),
                        source: e,
                    })
                }
            },
            Ok(None) => {
                debug!(
                    "no stored settings under key '{}', using defaults",
                    self.settings_key
                );
                Ok(NotificationSettings::default())
            }
            Err(core_error) => Err(NotificationError::persistence_error_from_core(
                "load_settings",
                format!("failed to read key '{}'", self.settings_key),
                core_error,
            )),
        }
    }

    async fn save_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<(), NotificationError> {
        let envelope = VersionedSettings {
            version: SCHEMA_VERSION,
            settings,
        };
        let payload = serde_json::to_string(&envelope).map_err(|e| {
            NotificationError::SerializationError {
                key: self.settings_key.clone(),
                source: e,
            }
        })?;
        self.storage
            .write_value(&self.settings_key, &payload)
            .await
            .map_err(|core_error| {
                NotificationError::persistence_error_from_core(
                    "save_settings",
                    format!("failed to write key '{}'", self.settings_key),
                    core_error,
                )
            })?;
        debug!("saved notification settings under key '{}'", self.settings_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::{
        NotificationChannel, NotificationInput, NotificationPriority,
    };
    use chrono::Utc;
    use hearth_core::error::CoreError;
    use hearth_core::storage::InMemoryStorageService;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn create_test_notification(title: &str) -> Notification {
        let input = NotificationInput {
            channel: NotificationChannel::Push,
            title: title.to_string(),
            message: format!("Body for {title}"),
            priority: NotificationPriority::Low,
            category: Some("tasks".to_string()),
            expiry_date: None,
        };
        Notification::new(input, Uuid::now_v7(), Utc::now())
    }

    fn provider_over(storage: Arc<InMemoryStorageService>) -> StorageNotificationPersistenceProvider {
        StorageNotificationPersistenceProvider::new(storage)
    }

    #[tokio::test]
    async fn load_notifications_absent_key_returns_empty() {
        let provider = provider_over(Arc::new(InMemoryStorageService::new()));
        assert!(provider.load_notifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_settings_absent_key_returns_defaults() {
        let provider = provider_over(Arc::new(InMemoryStorageService::new()));
        let settings = provider.load_settings().await.unwrap();
        assert_eq!(settings, NotificationSettings::default());
    }

    #[tokio::test]
    async fn save_and_load_notifications_round_trips() {
        let storage = Arc::new(InMemoryStorageService::new());
        let provider = provider_over(storage.clone());

        let to_save = vec![
            create_test_notification("First"),
            create_test_notification("Second"),
        ];
        provider.save_notifications(&to_save).await.unwrap();

        let loaded = provider.load_notifications().await.unwrap();
        assert_eq!(loaded, to_save);

        // The persisted payload carries the schema version tag.
        let raw = storage
            .read_value(NOTIFICATIONS_KEY)
            .await
            .unwrap()
            .unwrap();
        assert!(raw.contains(r#""version":1"#));
    }

    #[tokio::test]
    async fn save_and_load_settings_round_trips() {
        let provider = provider_over(Arc::new(InMemoryStorageService::new()));

        let mut settings = NotificationSettings::default();
        settings.email_enabled = true;
        settings.email_address = "family@example.com".to_string();
        provider.save_settings(&settings).await.unwrap();

        let loaded = provider.load_settings().await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn legacy_unversioned_notifications_still_load() {
        let storage = Arc::new(InMemoryStorageService::new());
        let legacy = vec![create_test_notification("Old")];
        storage
            .write_value(NOTIFICATIONS_KEY, &serde_json::to_string(&legacy).unwrap())
            .await
            .unwrap();

        let provider = provider_over(storage);
        let loaded = provider.load_notifications().await.unwrap();
        assert_eq!(loaded, legacy);
    }

    #[tokio::test]
    async fn legacy_unversioned_settings_still_load() {
        let storage = Arc::new(InMemoryStorageService::new());
        let mut legacy = NotificationSettings::default();
        legacy.push_enabled = false;
        storage
            .write_value(SETTINGS_KEY, &serde_json::to_string(&legacy).unwrap())
            .await
            .unwrap();

        let provider = provider_over(storage);
        let loaded = provider.load_settings().await.unwrap();
        assert_eq!(loaded, legacy);
    }

    #[tokio::test]
    async fn corrupt_notifications_payload_is_an_error() {
        let storage = Arc::new(InMemoryStorageService::new());
        storage
            .write_value(NOTIFICATIONS_KEY, "this is not json")
            .await
            .unwrap();

        let provider = provider_over(storage);
        let result = provider.load_notifications().await;
        assert!(matches!(
            result,
            Err(NotificationError::DeserializationError { .. })
        ));
    }

    #[tokio::test]
    async fn corrupt_settings_payload_is_an_error() {
        let storage = Arc::new(InMemoryStorageService::new());
        storage
            .write_value(SETTINGS_KEY, r#"{"version":1,"settings":{"push_enabled":"yes"}}"#)
            .await
            .unwrap();

        let provider = provider_over(storage);
        let result = provider.load_settings().await;
        assert!(matches!(
            result,
            Err(NotificationError::DeserializationError { .. })
        ));
    }

    /// Storage stub whose every operation fails, for error mapping tests.
    struct FailingStorage;

    #[async_trait]
    impl StorageService for FailingStorage {
        async fn read_value(&self, key: &str) -> Result<Option<String>, CoreError> {
            Err(CoreError::Storage {
                operation: "read".to_string(),
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "forced read error"),
            })
        }

        async fn write_value(&self, key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage {
                operation: "write".to_string(),
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "forced write error"),
            })
        }

        async fn remove_value(&self, _key: &str) -> Result<(), CoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn read_failure_maps_to_persistence_error() {
        let provider = StorageNotificationPersistenceProvider::new(Arc::new(FailingStorage));
        let result = provider.load_notifications().await;
        match result {
            Err(NotificationError::PersistenceError { operation, .. }) => {
                assert_eq!(operation, "load_notifications");
            }
            other => panic!("expected PersistenceError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn write_failure_maps_to_persistence_error() {
        let provider = StorageNotificationPersistenceProvider::new(Arc::new(FailingStorage));
        let result = provider.save_settings(&NotificationSettings::default()).await;
        match result {
            Err(NotificationError::PersistenceError { operation, .. }) => {
                assert_eq!(operation, "save_settings");
            }
            other => panic!("expected PersistenceError, got {other:?}"),
        }
    }
}
