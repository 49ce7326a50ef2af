//! Credential flows: login, registration and current-user lookup.

use std::sync::Arc;

use crate::domain::{NewUser, Role, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// A successful authentication: the issued token and the user it names.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Verify credentials and issue a token. An unknown email and a wrong
    /// password fail identically; the caller learns nothing about which
    /// factor was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(error = %e, "password verification errored");
                DomainError::Unauthenticated
            })?;
        if !valid {
            return Err(DomainError::Unauthenticated);
        }

        let token = self
            .tokens
            .issue(&user.email, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "login successful");
        Ok(AuthenticatedUser { token, user })
    }

    /// Register a self-service account with the `user` role and log it
    /// straight in.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthenticatedUser, DomainError> {
        let input = NewUser {
            name,
            email,
            password,
            role: Role::User,
        };
        input.validate()?;

        if self.users.exists_by_email(&input.email).await? {
            return Err(DomainError::EmailTaken(input.email));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .insert(User::new(input.name, input.email, password_hash, input.role))
            .await?;

        let token = self
            .tokens
            .issue(&user.email, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(AuthenticatedUser { token, user })
    }

    /// Resolve the user behind an authenticated subject (the context
    /// route).
    pub async fn current_user(&self, email: &str) -> Result<User, DomainError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }
}
