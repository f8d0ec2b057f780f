use std::fmt;

use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// Coarse class of a storage failure; the only part of it shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFault {
    UniqueViolation,
    ForeignKeyViolation,
    Other,
}

impl StorageFault {
    pub fn classify(err: &DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StorageFault::UniqueViolation,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => StorageFault::ForeignKeyViolation,
            _ => StorageFault::Other,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            StorageFault::UniqueViolation => "A record with the same value already exists",
            StorageFault::ForeignKeyViolation => "A referenced record does not exist",
            StorageFault::Other => "Something went wrong while saving, please try again",
        }
    }
}

impl fmt::Display for StorageFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("authentication required")]
    Unauthenticated,
    #[error("storage error: {0}")]
    Db(StorageFault),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", capitalize(entity))) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Unauthorized => 1004,
            ServiceError::Unauthenticated => 1005,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        let fault = StorageFault::classify(&err);
        error!(error = %err, fault = ?fault, "storage error");
        ServiceError::Db(fault)
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(e) => e.into(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
