use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Notification, NotificationSettings};

/// Change events published by the store over a broadcast channel.
///
/// Subscription is an optional enhancement: callers that only poll
/// `unread_count` never need to subscribe, and events carry no state the
/// query operations cannot reproduce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    Posted { notification: Notification },
    Read { id: Uuid },
    Deleted { id: Uuid },
    SettingsChanged { settings: NotificationSettings },
    /// Both collections were reset to defaults after a failed load.
    StoreReset,
}
