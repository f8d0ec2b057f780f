use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use service::notify::{spawn_notification_worker, ChannelQueue, LogMailer};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Upper bound for delivering queued notifications after ctrl-c.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时保持运行，由外部终止进程
        error!(event = "signal_handler_failed", error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "ctrl-c received; finishing in-flight requests");
}

/// Serve the blog, then let the notification worker empty its queue.
async fn run_blog(cfg: AppConfig) -> anyhow::Result<()> {
    let (queue, rx) = ChannelQueue::bounded(cfg.blog.notification_queue_capacity);
    let worker = spawn_notification_worker(rx, Arc::new(LogMailer));

    let served = server::serve(cfg, Arc::new(queue), ctrl_c()).await;

    // serve 返回后队列发送端已全部释放，worker 处理完剩余通知即退出
    match tokio::time::timeout(DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => info!(event = "notifications_drained", "notification queue empty"),
        Ok(Err(e)) => error!(event = "notification_worker_failed", error = %e, "worker task aborted"),
        Err(_) => warn!(
            event = "notification_drain_timeout",
            timeout_secs = DRAIN_TIMEOUT.as_secs(),
            "undelivered notifications dropped"
        ),
    }
    served
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        error!(event = "panic", %instance, message = %panic, "blog server panicked");
    }));

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "cannot start without a valid configuration");
            return ExitCode::FAILURE;
        }
    };
    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %instance,
        version = env!("CARGO_PKG_VERSION"),
        per_page = cfg.blog.per_page,
        queue_capacity = cfg.blog.notification_queue_capacity,
        "blog server starting"
    );
    match rt.block_on(run_blog(cfg)) {
        Ok(()) => {
            info!(event = "stop", %instance, "blog server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", %instance, error = %e, "blog server failed");
            ExitCode::FAILURE
        }
    }
}
