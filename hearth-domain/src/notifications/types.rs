use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel of a notification, fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Push,
    Email,
    Reminder,
    Expiry,
}

/// Informational priority; does not affect delivery or persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A timestamped, typed user-facing message with read/unread state.
///
/// Identity is immutable after creation; the only permitted mutation is
/// `read: false -> true` via [`Notification::mark_as_read`]. Deletion
/// removes the record permanently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub channel: NotificationChannel,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub priority: NotificationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(input: NotificationInput, id: Uuid, date: DateTime<Utc>) -> Self {
        Self {
            id,
            channel: input.channel,
            title: input.title,
            message: input.message,
            date,
            read: false,
            priority: input.priority,
            category: input.category,
            expiry_date: input.expiry_date,
        }
    }

    pub fn mark_as_read(&mut self) {
        self.read = true;
    }
}

/// Caller-supplied fields for a new notification. `id`, `date` and `read`
/// are synthesized by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationInput {
    pub channel: NotificationChannel,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: NotificationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// The user's notification preferences. Exactly one instance exists per
/// installation; all mutation goes through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub push_enabled: bool,
    pub email_enabled: bool,
    pub email_address: String,
    pub reminder_enabled: bool,
    pub expiry_enabled: bool,
    pub categories: Vec<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            push_enabled: true,
            email_enabled: false,
            email_address: String::new(),
            reminder_enabled: true,
            expiry_enabled: true,
            categories: default_categories(),
        }
    }
}

/// The category identifiers known to the application.
pub fn default_categories() -> Vec<String> {
    ["tasks", "shopping", "calendar", "finance", "inventory"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Partial settings form; fields left as `None` keep their current value
/// when merged with [`NotificationSettings::apply_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl NotificationSettings {
    /// Shallow-merges `update` into `self`.
    pub fn apply_update(&mut self, update: NotificationSettingsUpdate) {
        if let Some(v) = update.push_enabled {
            self.push_enabled = v;
        }
        if let Some(v) = update.email_enabled {
            self.email_enabled = v;
        }
        if let Some(v) = update.email_address {
            self.email_address = v;
        }
        if let Some(v) = update.reminder_enabled {
            self.reminder_enabled = v;
        }
        if let Some(v) = update.expiry_enabled {
            self.expiry_enabled = v;
        }
        if let Some(v) = update.categories {
            self.categories = v;
        }
    }
}

/// Inventory snapshot supplied by the inventory page for the expiry scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemSnapshot {
    pub id: String,
    pub name: String,
    pub expiry_date: DateTime<Utc>,
}

/// Calendar snapshot supplied by the calendar page for the reminder scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventSnapshot {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
}
