//! New-article notifications.
//!
//! Request handlers hand an [`ArticleNotification`] to a [`NotificationQueue`]
//! without waiting; a background worker drains the queue into a [`Mailer`].

pub mod channel;
pub mod mailer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use channel::{spawn_notification_worker, ChannelQueue};
pub use mailer::{LogMailer, MailError, Mailer};

/// One mail job: every subscriber learns about one new article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleNotification {
    pub article_id: i32,
    pub heading: String,
    pub author_name: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("notification queue is full")]
    Full,
    #[error("notification queue is closed")]
    Closed,
}

/// Non-blocking hand-off of notifications to background delivery.
pub trait NotificationQueue: Send + Sync {
    fn enqueue(&self, notification: ArticleNotification) -> Result<(), QueueError>;
}

/// In-memory queues for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every notification it is given.
    #[derive(Default)]
    pub struct RecordingQueue {
        sent: Mutex<Vec<ArticleNotification>>,
    }

    impl RecordingQueue {
        pub fn sent(&self) -> Vec<ArticleNotification> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl NotificationQueue for RecordingQueue {
        fn enqueue(&self, notification: ArticleNotification) -> Result<(), QueueError> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    /// Rejects everything, as a stopped worker would.
    #[derive(Default)]
    pub struct FailingQueue;

    impl NotificationQueue for FailingQueue {
        fn enqueue(&self, _notification: ArticleNotification) -> Result<(), QueueError> {
            Err(QueueError::Closed)
        }
    }
}
