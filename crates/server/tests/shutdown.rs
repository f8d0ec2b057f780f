use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use configs::AppConfig;
use service::notify::{
    spawn_notification_worker, ArticleNotification, ChannelQueue, MailError, Mailer, NotificationQueue,
};

#[derive(Default)]
struct CountingMailer {
    delivered: Mutex<Vec<i32>>,
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send(&self, notification: &ArticleNotification) -> Result<(), MailError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.delivered.lock().unwrap().push(notification.article_id);
        Ok(())
    }
}

fn in_memory_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.server.port = 0;
    cfg.database.url = "sqlite::memory:".into();
    cfg.database.max_connections = 1;
    cfg.database.min_connections = 1;
    cfg
}

#[tokio::test]
async fn shutdown_lets_worker_deliver_pending_notifications() -> anyhow::Result<()> {
    let (queue, rx) = ChannelQueue::bounded(8);
    let mailer = Arc::new(CountingMailer::default());
    let worker = spawn_notification_worker(rx, mailer.clone());

    for article_id in 1..=3 {
        queue
            .enqueue(ArticleNotification {
                article_id,
                heading: format!("post {article_id}"),
                author_name: "Ada".into(),
                recipients: vec!["reader@example.com".into()],
            })
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    // shutdown fires immediately; serve still has to release the queue
    server::serve(in_memory_config(), Arc::new(queue), async {}).await?;

    tokio::time::timeout(Duration::from_secs(5), worker).await??;
    assert_eq!(*mailer.delivered.lock().unwrap(), vec![1, 2, 3]);
    Ok(())
}
