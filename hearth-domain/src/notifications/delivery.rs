//! Delivery capability interfaces for the notification store.
//!
//! Record creation and delivery are decoupled: the store appends and
//! persists the notification first, then attempts delivery through these
//! injected capabilities. Delivery failures are logged by the store and
//! never roll back the record.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("permission request failed: {0}")]
    PermissionRequestFailed(String),

    #[error("platform alert channel unavailable: {0}")]
    AlertChannelUnavailable(String),

    #[error("email transport failed: {0}")]
    EmailTransportFailed(String),
}

/// Outcome of a platform notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Requests the platform's permission to show alerts.
///
/// The store asks before every dispatch; implementations are free to cache
/// the platform's answer.
#[async_trait]
pub trait PermissionBroker: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionDecision, DeliveryError>;
}

/// Fires a platform-level alert. Fire-and-forget: no delivery receipt is
/// consumed.
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    async fn dispatch_alert(
        &self,
        title: &str,
        message: &str,
        icon: Option<&str>,
    ) -> Result<(), DeliveryError>;
}

/// Dispatches notification content to an email address.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Permission broker that grants every request. Suitable where the host
/// platform has no permission concept.
pub struct GrantAllPermissionBroker;

#[async_trait]
impl PermissionBroker for GrantAllPermissionBroker {
    async fn request_permission(&self) -> Result<PermissionDecision, DeliveryError> {
        Ok(PermissionDecision::Granted)
    }
}

/// Permission broker that denies every request; the safe default when no
/// platform integration is wired up.
pub struct DenyAllPermissionBroker;

#[async_trait]
impl PermissionBroker for DenyAllPermissionBroker {
    async fn request_permission(&self) -> Result<PermissionDecision, DeliveryError> {
        Ok(PermissionDecision::Denied)
    }
}

/// Alert dispatcher that drops alerts.
pub struct NullAlertDispatcher;

#[async_trait]
impl AlertDispatcher for NullAlertDispatcher {
    async fn dispatch_alert(
        &self,
        _title: &str,
        _message: &str,
        _icon: Option<&str>,
    ) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// Email sender stub: no real transport, logs the intent only.
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_email(&self, to: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
        info!("sending email to {}: {}", to, subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grant_all_broker_grants() {
        let decision = GrantAllPermissionBroker.request_permission().await.unwrap();
        assert_eq!(decision, PermissionDecision::Granted);
    }

    #[tokio::test]
    async fn deny_all_broker_denies() {
        let decision = DenyAllPermissionBroker.request_permission().await.unwrap();
        assert_eq!(decision, PermissionDecision::Denied);
    }

    #[tokio::test]
    async fn null_dispatcher_accepts_alerts() {
        NullAlertDispatcher
            .dispatch_alert("T", "M", Some("icons/app.png"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn logging_email_sender_accepts_mail() {
        LoggingEmailSender
            .send_email("family@example.com", "Subject", "Body")
            .await
            .unwrap();
    }
}
