//! Per-address view counting.

use models::{address, article, hit_logger};
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;

/// Count one view of `article_id` from `ip`.
///
/// The address is resolved (or created), the `(article, address)` counter is
/// upserted and the article's running total is bumped, all in one
/// transaction. Concurrent views of the same pair are serialised by the
/// unique index behind the upsert, so none is lost.
pub async fn record_hit(db: &DatabaseConnection, article_id: i32, ip: &str) -> Result<address::Model, ServiceError> {
    let txn = db.begin().await?;
    let addr = address::find_or_create(&txn, ip).await?;
    hit_logger::increment_or_create(&txn, article_id, addr.id).await?;
    article::Entity::update_many()
        .col_expr(article::Column::HitCount, Expr::col(article::Column::HitCount).add(1))
        .filter(article::Column::Id.eq(article_id))
        .exec(&txn)
        .await?;
    txn.commit().await?;
    debug!(article_id, address_id = addr.id, "hit_recorded");
    Ok(addr)
}
