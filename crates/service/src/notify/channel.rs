use std::sync::Arc;

use common::metrics::NOTIFICATIONS_FAILED_TOTAL;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{ArticleNotification, Mailer, NotificationQueue, QueueError};

/// Bounded tokio channel feeding the notification worker.
#[derive(Clone)]
pub struct ChannelQueue {
    tx: mpsc::Sender<ArticleNotification>,
}

impl ChannelQueue {
    /// Create the queue and the receiving end for [`spawn_notification_worker`].
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ArticleNotification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl NotificationQueue for ChannelQueue {
    fn enqueue(&self, notification: ArticleNotification) -> Result<(), QueueError> {
        self.tx.try_send(notification).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Closed(_) => QueueError::Closed,
        })
    }
}

/// Drain `rx` until every sender is dropped.
pub fn spawn_notification_worker(
    mut rx: mpsc::Receiver<ArticleNotification>,
    mailer: Arc<dyn Mailer>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(event = "notification_worker_started", "notification worker running");
        while let Some(notification) = rx.recv().await {
            if let Err(e) = mailer.send(&notification).await {
                NOTIFICATIONS_FAILED_TOTAL.inc();
                warn!(event = "notification_failed", article_id = notification.article_id, error = %e, "delivery failed");
            }
        }
        info!(event = "notification_worker_stopped", "notification queue closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MailError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        delivered: Mutex<Vec<i32>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, notification: &ArticleNotification) -> Result<(), MailError> {
            self.delivered.lock().unwrap().push(notification.article_id);
            Ok(())
        }
    }

    fn job(article_id: i32) -> ArticleNotification {
        ArticleNotification {
            article_id,
            heading: format!("post {article_id}"),
            author_name: "Ada".into(),
            recipients: vec!["reader@example.com".into()],
        }
    }

    #[tokio::test]
    async fn worker_delivers_in_order_and_stops_when_closed() {
        let (queue, rx) = ChannelQueue::bounded(8);
        let mailer = Arc::new(RecordingMailer::default());
        let handle = spawn_notification_worker(rx, mailer.clone());

        queue.enqueue(job(1)).unwrap();
        queue.enqueue(job(2)).unwrap();
        drop(queue);
        handle.await.unwrap();

        assert_eq!(*mailer.delivered.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn full_and_closed_are_reported() {
        let (queue, rx) = ChannelQueue::bounded(1);
        queue.enqueue(job(1)).unwrap();
        assert_eq!(queue.enqueue(job(2)), Err(QueueError::Full));
        drop(rx);
        assert_eq!(queue.enqueue(job(3)), Err(QueueError::Closed));
    }
}
