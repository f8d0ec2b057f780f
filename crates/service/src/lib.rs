//! Service layer providing the blog's business operations on top of models.
//! - Separates business logic from data access and from the HTTP layer.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every operation receives the request context explicitly.

pub mod errors;
pub mod pagination;
pub mod context;
pub mod auth;
pub mod notify;
pub mod articles;
pub mod dashboard;
#[cfg(test)]
pub mod test_support;

pub use articles::ArticleService;
pub use context::RequestContext;
pub use errors::ServiceError;
