//! Restart behavior of the notification store over the filesystem backend.

use std::sync::Arc;

use hearth_core::storage::{FilesystemStorageService, StorageService};
use hearth_domain::notifications::{
    DefaultNotificationStore, DenyAllPermissionBroker, LoggingEmailSender, NotificationChannel,
    NotificationInput, NotificationPriority, NotificationSettingsUpdate, NotificationStore,
    NullAlertDispatcher, StorageNotificationPersistenceProvider, SETTINGS_KEY,
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> DefaultNotificationStore {
    let storage = Arc::new(FilesystemStorageService::new(dir.path().join("hearth")));
    DefaultNotificationStore::new(
        Arc::new(StorageNotificationPersistenceProvider::new(storage)),
        Arc::new(DenyAllPermissionBroker),
        Arc::new(NullAlertDispatcher),
        Arc::new(LoggingEmailSender),
        16,
    )
}

fn sample_input(title: &str) -> NotificationInput {
    NotificationInput {
        channel: NotificationChannel::Push,
        title: title.to_string(),
        message: format!("Message for {title}"),
        priority: NotificationPriority::Low,
        category: Some("tasks".to_string()),
        expiry_date: None,
    }
}

#[tokio::test]
async fn collection_and_settings_survive_restart() {
    let dir = TempDir::new().unwrap();

    let first = store_in(&dir);
    let a = first.add_notification(sample_input("first")).await;
    first.add_notification(sample_input("second")).await;
    first.mark_as_read(a.id).await;
    first
        .update_settings(NotificationSettingsUpdate {
            email_enabled: Some(true),
            email_address: Some("family@example.com".to_string()),
            ..Default::default()
        })
        .await;
    let notifications = first.get_notifications().await;
    let settings = first.get_settings().await;
    drop(first);

    let second = store_in(&dir);
    assert_eq!(second.get_notifications().await, notifications);
    assert_eq!(second.get_settings().await, settings);
    assert_eq!(second.unread_count().await, 1);
}

#[tokio::test]
async fn corrupt_settings_file_resets_to_defaults_on_restart() {
    let dir = TempDir::new().unwrap();

    let first = store_in(&dir);
    first.add_notification(sample_input("doomed")).await;
    drop(first);

    let storage = FilesystemStorageService::new(dir.path().join("hearth"));
    storage
        .write_value(SETTINGS_KEY, "{definitely not json")
        .await
        .unwrap();

    let second = store_in(&dir);
    assert!(second.get_notifications().await.is_empty());
    assert_eq!(
        second.get_settings().await,
        hearth_domain::NotificationSettings::default()
    );
}
