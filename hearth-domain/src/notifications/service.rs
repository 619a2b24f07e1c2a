use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::delivery::{AlertDispatcher, EmailSender, PermissionBroker, PermissionDecision};
use super::events::NotificationEvent;
use super::persistence_iface::NotificationPersistenceProvider;
use super::types::{
    CalendarEventSnapshot, InventoryItemSnapshot, Notification, NotificationChannel,
    NotificationInput, NotificationPriority, NotificationSettings, NotificationSettingsUpdate,
};

/// Items expiring within this window trigger an expiry notification.
const EXPIRY_WINDOW_DAYS: i64 = 3;
/// Events starting within this window trigger a reminder notification.
const REMINDER_WINDOW_HOURS: i64 = 1;

// --- NotificationStore Trait ---

/// Single authoritative holder of notifications and settings.
///
/// All operations are infallible from the caller's perspective: internal
/// persistence and delivery failures are logged and degrade to
/// "in-memory state stands". Operations that depend on loaded state await
/// initialization first, so the store may be constructed eagerly and used
/// lazily.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Current collection, most recently created first.
    async fn get_notifications(&self) -> Vec<Notification>;

    async fn get_settings(&self) -> NotificationSettings;

    /// Shallow-merges `update` into the settings and persists the merged
    /// object. The in-memory update is retained even if persistence fails.
    async fn update_settings(&self, update: NotificationSettingsUpdate);

    /// Creates a notification from `input`, persists the collection and
    /// attempts the configured delivery side effects. Creation always
    /// succeeds regardless of delivery outcome.
    async fn add_notification(&self, input: NotificationInput) -> Notification;

    /// Flips the record's `read` flag to `true`. No-op if `id` is absent.
    async fn mark_as_read(&self, id: Uuid);

    /// Removes the record permanently. No-op if `id` is absent.
    async fn delete_notification(&self, id: Uuid);

    /// Count of unread records. Intended for periodic polling by the UI.
    async fn unread_count(&self) -> usize;

    /// Adds an expiry notification for every item whose expiry date falls
    /// within the next three days (inclusive both ends). Performs no
    /// deduplication across calls; gated on `expiry_enabled`.
    async fn check_expiry_dates(&self, items: &[InventoryItemSnapshot]);

    /// Adds a reminder notification for every event starting within the
    /// next hour (exclusive of now, inclusive of the boundary). Performs no
    /// deduplication across calls; gated on `reminder_enabled`.
    async fn check_upcoming_events(&self, events: &[CalendarEventSnapshot]);

    /// Optional push-based change channel; polling callers need not
    /// subscribe.
    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent>;
}

// --- DefaultNotificationStore Implementation ---

struct StoreState {
    notifications: Vec<Notification>,
    settings: NotificationSettings,
    initialized: bool,
}

/// Default [`NotificationStore`] over injected persistence and delivery
/// capabilities. The composition root constructs exactly one instance and
/// hands it to callers; there is no global accessor.
pub struct DefaultNotificationStore {
    state: RwLock<StoreState>,
    persistence: Arc<dyn NotificationPersistenceProvider>,
    permission_broker: Arc<dyn PermissionBroker>,
    alert_dispatcher: Arc<dyn AlertDispatcher>,
    email_sender: Arc<dyn EmailSender>,
    alert_icon: Option<String>,
    event_publisher: broadcast::Sender<NotificationEvent>,
}

impl DefaultNotificationStore {
    pub fn new(
        persistence: Arc<dyn NotificationPersistenceProvider>,
        permission_broker: Arc<dyn PermissionBroker>,
        alert_dispatcher: Arc<dyn AlertDispatcher>,
        email_sender: Arc<dyn EmailSender>,
        broadcast_capacity: usize,
    ) -> Self {
        let (event_publisher, _) = broadcast::channel(broadcast_capacity);
        Self {
            state: RwLock::new(StoreState {
                notifications: Vec::new(),
                settings: NotificationSettings::default(),
                initialized: false,
            }),
            persistence,
            permission_broker,
            alert_dispatcher,
            email_sender,
            alert_icon: None,
            event_publisher,
        }
    }

    /// Icon hint forwarded with every platform alert.
    pub fn with_alert_icon(mut self, icon: impl Into<String>) -> Self {
        self.alert_icon = Some(icon.into());
        self
    }

    /// Loads both records on first use. A failed load of either record
    /// resets BOTH collections to their defaults so the store never runs
    /// with a partial mix of persisted and default state. Idempotent.
    async fn ensure_initialized(&self) {
        {
            let state = self.state.read().await;
            if state.initialized {
                return;
            }
        }

        let mut state = self.state.write().await;
        if state.initialized {
            return;
        }

        let notifications = self.persistence.load_notifications().await;
        let settings = self.persistence.load_settings().await;
        match (notifications, settings) {
            (Ok(notifications), Ok(settings)) => {
                info!(
                    "notification store loaded: {} notifications",
                    notifications.len()
                );
                state.notifications = notifications;
                state.settings = settings;
            }
            (notifications_result, settings_result) => {
                if let Err(e) = &notifications_result {
                    error!("failed to load notifications: {}", e);
                }
                if let Err(e) = &settings_result {
                    error!("failed to load notification settings: {}", e);
                }
                warn!("resetting notifications and settings to defaults");
                state.notifications = Vec::new();
                state.settings = NotificationSettings::default();
                self.publish_event(NotificationEvent::StoreReset);
            }
        }
        state.initialized = true;
    }

    fn publish_event(&self, event: NotificationEvent) {
        if self.event_publisher.send(event).is_err() {
            debug!("no active notification event subscribers");
        }
    }

    /// Delivery side effects for a freshly created notification. Every
    /// failure path logs and returns; nothing here can undo the record.
    async fn deliver(&self, notification: &Notification, settings: &NotificationSettings) {
        if settings.push_enabled {
            match self.permission_broker.request_permission().await {
                Ok(PermissionDecision::Granted) => {
                    if let Err(e) = self
                        .alert_dispatcher
                        .dispatch_alert(
                            &notification.title,
                            &notification.message,
                            self.alert_icon.as_deref(),
                        )
                        .await
                    {
                        warn!(
                            "platform alert for notification {} failed: {}",
                            notification.id, e
                        );
                    }
                }
                Ok(PermissionDecision::Denied) => {
                    debug!("platform alert permission denied, skipping alert");
                }
                Err(e) => {
                    warn!("permission request failed: {}", e);
                }
            }
        }

        if settings.email_enabled && !settings.email_address.is_empty() {
            if let Err(e) = self
                .email_sender
                .send_email(
                    &settings.email_address,
                    &notification.title,
                    &notification.message,
                )
                .await
            {
                warn!(
                    "email dispatch for notification {} failed: {}",
                    notification.id, e
                );
            }
        }
    }
}

#[async_trait]
impl NotificationStore for DefaultNotificationStore {
    async fn get_notifications(&self) -> Vec<Notification> {
        self.ensure_initialized().await;
        self.state.read().await.notifications.clone()
    }

    async fn get_settings(&self) -> NotificationSettings {
        self.ensure_initialized().await;
        self.state.read().await.settings.clone()
    }

    async fn update_settings(&self, update: NotificationSettingsUpdate) {
        self.ensure_initialized().await;
        let settings = {
            let mut state = self.state.write().await;
            state.settings.apply_update(update);
            if let Err(e) = self.persistence.save_settings(&state.settings).await {
                warn!("failed to persist notification settings: {}", e);
            }
            state.settings.clone()
        };
        self.publish_event(NotificationEvent::SettingsChanged { settings });
    }

    async fn add_notification(&self, input: NotificationInput) -> Notification {
        self.ensure_initialized().await;
        let notification = Notification::new(input, Uuid::now_v7(), Utc::now());

        let settings = {
            let mut state = self.state.write().await;
            state.notifications.insert(0, notification.clone());
            if let Err(e) = self.persistence.save_notifications(&state.notifications).await {
                warn!("failed to persist notifications: {}", e);
            }
            state.settings.clone()
        };

        info!(
            "notification {} posted: {}",
            notification.id, notification.title
        );
        self.publish_event(NotificationEvent::Posted {
            notification: notification.clone(),
        });

        self.deliver(&notification, &settings).await;
        notification
    }

    async fn mark_as_read(&self, id: Uuid) {
        self.ensure_initialized().await;
        let newly_read = {
            let mut state = self.state.write().await;
            let newly_read = match state.notifications.iter_mut().find(|n| n.id == id) {
                Some(notification) => {
                    let newly_read = !notification.read;
                    notification.mark_as_read();
                    newly_read
                }
                None => {
                    debug!("mark_as_read: notification {} not found", id);
                    return;
                }
            };
            if let Err(e) = self.persistence.save_notifications(&state.notifications).await {
                warn!("failed to persist notifications: {}", e);
            }
            newly_read
        };
        if newly_read {
            self.publish_event(NotificationEvent::Read { id });
        }
    }

    async fn delete_notification(&self, id: Uuid) {
        self.ensure_initialized().await;
        {
            let mut state = self.state.write().await;
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != id);
            if state.notifications.len() == before {
                debug!("delete_notification: notification {} not found", id);
                return;
            }
            if let Err(e) = self.persistence.save_notifications(&state.notifications).await {
                warn!("failed to persist notifications: {}", e);
            }
        }
        self.publish_event(NotificationEvent::Deleted { id });
    }

    async fn unread_count(&self) -> usize {
        self.ensure_initialized().await;
        self.state
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    async fn check_expiry_dates(&self, items: &[InventoryItemSnapshot]) {
        self.ensure_initialized().await;
        let settings = self.state.read().await.settings.clone();
        if !settings.expiry_enabled {
            debug!("expiry scan disabled by settings");
            return;
        }

        let now = Utc::now();
        let window_end = now + Duration::days(EXPIRY_WINDOW_DAYS);
        for item in items {
            if item.expiry_date >= now && item.expiry_date <= window_end {
                self.add_notification(NotificationInput {
                    channel: NotificationChannel::Expiry,
                    title: "Expiry date approaching".to_string(),
                    message: format!(
                        "{} expires on {}",
                        item.name,
                        item.expiry_date.format("%Y-%m-%d")
                    ),
                    priority: NotificationPriority::High,
                    category: Some("inventory".to_string()),
                    expiry_date: Some(item.expiry_date),
                })
                .await;
            }
        }
    }

    async fn check_upcoming_events(&self, events: &[CalendarEventSnapshot]) {
        self.ensure_initialized().await;
        let settings = self.state.read().await.settings.clone();
        if !settings.reminder_enabled {
            debug!("reminder scan disabled by settings");
            return;
        }

        let now = Utc::now();
        let window_end = now + Duration::hours(REMINDER_WINDOW_HOURS);
        for event in events {
            if event.start > now && event.start <= window_end {
                self.add_notification(NotificationInput {
                    channel: NotificationChannel::Reminder,
                    title: "Upcoming event".to_string(),
                    message: format!("{} starts in about an hour", event.title),
                    priority: NotificationPriority::Medium,
                    category: Some("calendar".to_string()),
                    expiry_date: None,
                })
                .await;
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.event_publisher.subscribe()
    }
}
