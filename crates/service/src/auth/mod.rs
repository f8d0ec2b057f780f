//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Resolves the bearer token of a request into the current user with roles,
//! and hosts the authorization predicates the article operations share.
//! Issuing tokens belongs to the login provider, not to this crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod authz;

pub use service::AuthService;
