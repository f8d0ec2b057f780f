use thiserror::Error;

/// Failures while resolving the current user of a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("user not found")]
    UnknownUser,
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1010,
            AuthError::InvalidToken(_) => 1011,
            AuthError::UnknownUser => 1012,
            AuthError::Repository(_) => 1200,
        }
    }
}
