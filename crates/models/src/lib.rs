//! sea-orm entities for the blog schema plus small data-access helpers.
//!
//! Helpers validate their inputs and stay generic over [`sea_orm::ConnectionTrait`]
//! so callers can run them on a pool or inside a transaction.

pub mod errors;
pub mod db;
pub mod user;
pub mod user_role;
pub mod category;
pub mod keyword;
pub mod address;
pub mod article;
pub mod article_keyword;
pub mod comment;
pub mod hit_logger;

#[cfg(test)]
mod tests;
