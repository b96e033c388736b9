use sea_orm::DatabaseConnection;

use crate::auth::domain::{AuthUser, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::{AuthRepository, StoredAccount};
use models::errors::ModelError;
use models::user;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_auth_user(u: &user::Model) -> AuthUser {
    AuthUser {
        id: u.id,
        email: u.email.clone(),
        first_name: u.first_name.clone(),
        last_name: u.last_name.clone(),
        role: u.role.clone(),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, AuthError> {
        let found = user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(found.map(|u| StoredAccount { user: to_auth_user(&u), password_hash: u.password_hash }))
    }

    async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
        let created = user::create(
            &self.db,
            user::NewUser {
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email,
                introduction: account.introduction,
                role: account.role,
                password_hash: account.password_hash,
            },
        )
        .await
        .map_err(|e| match e {
            ModelError::Validation(msg) => AuthError::Validation(msg),
            ModelError::Db(msg) => AuthError::Repository(msg),
        })?;
        Ok(to_auth_user(&created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn account(email: &str) -> NewAccount {
        NewAccount {
            first_name: "Lior".into(),
            last_name: "Chamla".into(),
            email: email.into(),
            introduction: None,
            role: user::ROLE_USER.into(),
            password_hash: "$argon2id$fake".into(),
        }
    }

    #[tokio::test]
    async fn create_then_find_is_case_insensitive() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAuthRepository::new(get_db().await?);
        let created = repo.create_account(account("Guest@Example.com")).await?;
        assert_eq!(created.email, "guest@example.com");

        let found = repo.find_by_email("GUEST@example.com").await?.expect("account");
        assert_eq!(found.user, created);
        assert_eq!(found.password_hash, "$argon2id$fake");
        assert!(repo.find_by_email("nobody@example.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_is_a_validation_error() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAuthRepository::new(get_db().await?);
        let err = repo.create_account(account("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        Ok(())
    }
}
