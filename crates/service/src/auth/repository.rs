use async_trait::async_trait;

use super::domain::{AuthUser, NewAccount};
use super::errors::AuthError;

/// Account row as the auth layer sees it: the public user plus its password hash.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Lookup is case-insensitive on the email.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, AuthError>;
    async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: Mutex<HashMap<String, StoredAccount>>, // key: lowercased email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<StoredAccount>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(&email.trim().to_lowercase()).cloned())
        }

        async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
            let key = account.email.trim().to_lowercase();
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: key.clone(),
                first_name: account.first_name,
                last_name: account.last_name,
                role: account.role,
            };
            accounts.insert(key, StoredAccount { user: user.clone(), password_hash: account.password_hash });
            Ok(user)
        }
    }
}
