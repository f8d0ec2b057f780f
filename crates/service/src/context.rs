use serde::Serialize;

use crate::auth::domain::CurrentUser;

/// Per-request facts every operation may need: who is asking, and from where.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub user: Option<CurrentUser>,
    pub client_ip: String,
}

impl RequestContext {
    pub fn anonymous(client_ip: impl Into<String>) -> Self {
        Self { user: None, client_ip: client_ip.into() }
    }

    pub fn authenticated(user: CurrentUser, client_ip: impl Into<String>) -> Self {
        Self { user: Some(user), client_ip: client_ip.into() }
    }
}
