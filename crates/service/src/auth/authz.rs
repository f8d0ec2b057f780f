//! Authorization predicates for article mutations.

use models::user_role::Role;

use super::domain::CurrentUser;
use crate::context::RequestContext;
use crate::errors::ServiceError;

/// An author may only touch articles they wrote; other staff roles are not
/// restricted by ownership.
pub fn is_denied(user: &CurrentUser, owner_id: i32) -> bool {
    user.has_role(Role::Author) && owner_id != user.id
}

pub fn authorize_owner(user: &CurrentUser, owner_id: i32) -> Result<(), ServiceError> {
    if is_denied(user, owner_id) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(())
}

/// The authenticated staff member behind a back-office request.
pub fn require_staff(ctx: &RequestContext) -> Result<&CurrentUser, ServiceError> {
    let user = ctx.user.as_ref().ok_or(ServiceError::Unauthenticated)?;
    if !user.is_staff() {
        return Err(ServiceError::Unauthorized);
    }
    Ok(user)
}
