use models::user_role::Role;
use serde::{Deserialize, Serialize};

/// JWT claims accepted from the login provider; `sub` carries the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Domain user (business view) with the roles loaded for this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Holds at least one back-office role.
    pub fn is_staff(&self) -> bool {
        !self.roles.is_empty()
    }
}
