use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::notify::NotificationQueue;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrations: {e}")))?;
        info!(event = "migrations_applied", "schema up to date");
    }
    Ok(db)
}

/// Connect, migrate and serve until `shutdown` resolves.
///
/// `queue` is owned by the router; once in-flight requests finish and this
/// returns, every sender is gone and the notification worker drains what is
/// left and exits.
pub async fn serve<F>(cfg: AppConfig, queue: Arc<dyn NotificationQueue>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if cfg.auth.is_dev_secret() {
        warn!(event = "dev_jwt_secret", "JWT_SECRET not set; using the development secret");
    }
    let db = connect(&cfg).await?;
    let app: Router = routes::build_router(ServerState::new(db, &cfg, queue), build_cors());

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(event = "listening", addr = %listener.local_addr()?, "blog http server ready");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(event = "http_stopped", "no longer accepting requests");
    Ok(())
}
