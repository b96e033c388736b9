use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, NewAccount, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

const MIN_PASSWORD_LEN: usize = 8;

/// Token signing settings
#[derive(Clone)]
pub struct TokenSettings {
    pub jwt_secret: String,
    pub ttl_hours: i64,
}

impl From<&configs::AuthConfig> for TokenSettings {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), ttl_hours: cfg.token_ttl_hours }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    tokens: TokenSettings,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenSettings) -> Self { Self { repo, tokens } }

    /// Register a new member account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenSettings, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, TokenSettings { jwt_secret: "secret".into(), ttl_hours: 12 });
    /// let input = RegisterInput { first_name: "Ada".into(), last_name: "Lovelace".into(), email: "ada@example.com".into(), password: "Secret123".into(), introduction: None };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.role, "ROLE_USER");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        self.create_account(input, models::user::ROLE_USER).await
    }

    /// Same as [`register`](Self::register) with the admin role; used to seed back-office accounts.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_admin(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        self.create_account(input, models::user::ROLE_ADMIN).await
    }

    async fn create_account(&self, input: RegisterInput, role: &str) -> Result<AuthUser, AuthError> {
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("user exists: {}", existing.user.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.create_account(NewAccount {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            introduction: input.introduction,
            role: role.to_string(),
            password_hash: hash,
        }).await?;
        info!(user_id = %user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a signed token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenSettings, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, TokenSettings { jwt_secret: "secret".into(), ttl_hours: 12 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { first_name: "A".into(), last_name: "B".into(), email: "u@e.com".into(), password: "Passw0rd".into(), introduction: None }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let account = self.repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&account.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let user = account.user;
        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.tokens.ttl_hours)).timestamp() as usize;
        let claims = Claims { sub: user.email.clone(), uid: user.id, role: user.role.clone(), exp };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.tokens.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Decode and check a token issued by [`login`](Self::login).
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.tokens.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            TokenSettings { jwt_secret: "test-secret".into(), ttl_hours: 12 },
        )
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            first_name: "Marie".into(),
            last_name: "Curie".into(),
            email: email.into(),
            password: password.into(),
            introduction: Some("Physicist and chemist".into()),
        }
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let err = svc().register(input("m@c.fr", "short")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.code(), 1001);
    }

    #[tokio::test]
    async fn password_length_counts_characters() {
        let err = svc().register(input("e@c.fr", "éééé")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert!(svc().register(input("e@c.fr", "éléphant")).await.is_ok());
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let svc = svc();
        svc.register(input("m@c.fr", "Radium1898")).await.unwrap();
        let err = svc.register(input("M@C.fr", "Radium1898")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn login_issues_token_with_role() {
        let svc = svc();
        let admin = svc.register_admin(input("admin@c.fr", "Polonium1")).await.unwrap();
        let session = svc.login(LoginInput { email: "admin@c.fr".into(), password: "Polonium1".into() }).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.uid, admin.id);
        assert_eq!(claims.role, models::user::ROLE_ADMIN);
        assert_eq!(claims.sub, "admin@c.fr");
        assert!(session.user.is_admin());
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let svc = svc();
        svc.register(input("m@c.fr", "Radium1898")).await.unwrap();
        let err = svc.login(LoginInput { email: "m@c.fr".into(), password: "nope-nope".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let err = svc.login(LoginInput { email: "ghost@c.fr".into(), password: "Radium1898".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn tampered_token_is_rejected() {
        assert!(matches!(svc().verify_token("a.b.c"), Err(AuthError::Unauthorized)));
    }
}
