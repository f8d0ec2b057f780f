use async_trait::async_trait;

use super::domain::CurrentUser;
use super::errors::AuthError;

/// Lookup of users together with their roles.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_current_user(&self, user_id: i32) -> Result<Option<CurrentUser>, AuthError>;
}

/// Simple in-memory mock directory for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserDirectory {
        users: Mutex<HashMap<i32, CurrentUser>>, // key: user id
    }

    impl MockUserDirectory {
        pub fn insert(&self, user: CurrentUser) {
            self.users.lock().unwrap().insert(user.id, user);
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_current_user(&self, user_id: i32) -> Result<Option<CurrentUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&user_id).cloned())
        }
    }
}
