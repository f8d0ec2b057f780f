//! Keyword tags of an article.

use std::collections::HashSet;

use models::errors::ModelError;
use models::{article_keyword, keyword};
use sea_orm::ConnectionTrait;

/// Split the submitted keyword string on whitespace, dropping empties and
/// repeats while keeping the first-seen order.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split_whitespace()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Ensure every keyword exists and link it to the article.
pub async fn attach<C: ConnectionTrait>(db: &C, article_id: i32, names: &[String]) -> Result<Vec<keyword::Model>, ModelError> {
    let mut found = Vec::with_capacity(names.len());
    for name in names {
        found.push(keyword::find_or_create(db, name).await?);
    }
    let ids: Vec<i32> = found.iter().map(|k| k.id).collect();
    article_keyword::attach(db, article_id, &ids).await?;
    Ok(found)
}

/// Drop every existing link of the article, then attach `names`.
pub async fn replace<C: ConnectionTrait>(db: &C, article_id: i32, names: &[String]) -> Result<Vec<keyword::Model>, ModelError> {
    article_keyword::detach_all(db, article_id).await?;
    attach(db, article_id, names).await
}
