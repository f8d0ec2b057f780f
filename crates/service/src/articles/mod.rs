//! Article operations: public browsing, back-office editing, search.

pub mod domain;
pub mod keywords;
pub mod hits;
pub mod service;

pub use service::ArticleService;
