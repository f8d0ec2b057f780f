use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, instrument};

use super::domain::{Claims, CurrentUser};
use super::errors::AuthError;
use super::repository::UserDirectory;

/// Resolves bearer tokens into users, independent of web framework
pub struct AuthService<R: UserDirectory + ?Sized> {
    repo: Arc<R>,
    decoding_key: DecodingKey,
}

impl<R: UserDirectory + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, jwt_secret: &str) -> Self {
        Self { repo, decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()) }
    }

    /// Verify an HS256 token and load the user it names.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let user_id: i32 = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".into()))?;
        let user = self.repo.find_current_user(user_id).await?.ok_or(AuthError::UnknownUser)?;
        debug!(user_id = user.id, roles = ?user.roles, "token_authenticated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockUserDirectory;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use models::user_role::Role;

    fn token(sub: &str, secret: &str, ttl_secs: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + ttl_secs) as usize;
        let claims = Claims { sub: sub.into(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn service() -> AuthService<MockUserDirectory> {
        let repo = Arc::new(MockUserDirectory::default());
        repo.insert(CurrentUser { id: 7, name: "Ada".into(), email: "ada@example.com".into(), roles: vec![Role::Author] });
        AuthService::new(repo, "secret")
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let user = service().authenticate(&token("7", "secret", 600)).await.unwrap();
        assert_eq!(user.id, 7);
        assert!(user.has_role(Role::Author));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let err = service().authenticate(&token("7", "other", 600)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let err = service().authenticate(&token("7", "secret", -3600)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let err = service().authenticate(&token("99", "secret", 600)).await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownUser));
        let err = service().authenticate("").await.unwrap_err();
        assert_eq!(err.code(), 1010);
    }
}
