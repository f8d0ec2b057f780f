use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::ArticleNotification;

#[derive(Debug, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Delivery transport for notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &ArticleNotification) -> Result<(), MailError>;
}

/// Writes each delivery to the log instead of sending mail.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, notification: &ArticleNotification) -> Result<(), MailError> {
        info!(
            event = "notification_delivered",
            article_id = notification.article_id,
            heading = %notification.heading,
            recipients = notification.recipients.len(),
            "new article notification"
        );
        Ok(())
    }
}
