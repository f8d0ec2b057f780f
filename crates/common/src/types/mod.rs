use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Severity of a user-facing message attached to a redirect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Error,
}

/// Body sent alongside a `303 See Other`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    pub location: String,
}

impl Flash {
    pub fn new(level: FlashLevel, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), location: location.into() }
    }
}
