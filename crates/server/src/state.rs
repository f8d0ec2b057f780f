use std::sync::Arc;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmUserDirectory;
use service::auth::AuthService;
use service::notify::NotificationQueue;
use service::ArticleService;

/// Shared handles for every request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub articles: ArticleService,
    pub auth: Arc<AuthService<SeaOrmUserDirectory>>,
    pub trust_proxy_headers: bool,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig, queue: Arc<dyn NotificationQueue>) -> Self {
        let directory = Arc::new(SeaOrmUserDirectory { db: db.clone() });
        Self {
            articles: ArticleService::new(db.clone(), queue, cfg.blog.per_page),
            auth: Arc::new(AuthService::new(directory, &cfg.auth.jwt_secret)),
            trust_proxy_headers: cfg.blog.trust_proxy_headers,
            db,
        }
    }
}
