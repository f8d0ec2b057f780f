use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::domain::CurrentUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::UserDirectory;

pub struct SeaOrmUserDirectory {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find_current_user(&self, user_id: i32) -> Result<Option<CurrentUser>, AuthError> {
        let Some(user) = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
        else {
            return Ok(None);
        };
        let roles = models::user_role::roles_for(&self.db, user.id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Some(CurrentUser { id: user.id, name: user.name, email: user.email, roles }))
    }
}
