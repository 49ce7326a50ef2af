//! Admin-side user management and the self-service password update.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewUser, User, UserUpdate, validate_password};
use crate::error::DomainError;
use crate::ports::{PasswordService, UserRepository};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "user", id })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_email(email).await?)
    }

    pub async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        input.validate()?;

        if self.users.exists_by_email(&input.email).await? {
            return Err(DomainError::EmailTaken(input.email));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let created = self
            .users
            .insert(User::new(input.name, input.email, password_hash, input.role))
            .await?;
        tracing::info!(user_id = %created.id, role = %created.role, "user created");
        Ok(created)
    }

    /// Replace a user. A missing password keeps the stored hash.
    pub async fn update(&self, id: Uuid, input: UserUpdate) -> Result<User, DomainError> {
        input.validate()?;

        let existing = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "user", id })?;

        if input.email != existing.email && self.users.exists_by_email(&input.email).await? {
            return Err(DomainError::EmailTaken(input.email));
        }

        let password_hash = match input.password {
            Some(password) => self
                .passwords
                .hash(&password)
                .map_err(|e| DomainError::Internal(e.to_string()))?,
            None => existing.password_hash,
        };

        let updated = User {
            id,
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        Ok(self.users.update(updated).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Self-service password change: the current password must verify
    /// before the new hash is stored.
    pub async fn update_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        validate_password(new_password)?;

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        let valid = self
            .passwords
            .verify(current_password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::Validation(
                "current password is incorrect".into(),
            ));
        }

        let password_hash = self
            .passwords
            .hash(new_password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let updated = User {
            password_hash,
            updated_at: Utc::now(),
            ..user
        };

        tracing::info!(user_id = %updated.id, "password changed");
        Ok(self.users.update(updated).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::service::test_support::{FakeUserRepo, PlainPasswords};

    fn service(users: Arc<FakeUserRepo>) -> UserService {
        UserService::new(users, Arc::new(PlainPasswords))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana".into(),
            email: email.into(),
            password: "s3cret-pass".into(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn create_rejects_a_taken_email() {
        let users = service(Arc::new(FakeUserRepo::new()));
        users.create(new_user("ana@example.com")).await.unwrap();

        let result = users.create(new_user("ana@example.com")).await;

        assert!(matches!(result, Err(DomainError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn update_without_password_keeps_the_stored_hash() {
        let users = service(Arc::new(FakeUserRepo::new()));
        let created = users.create(new_user("ana@example.com")).await.unwrap();

        let updated = users
            .update(
                created.id,
                UserUpdate {
                    name: "Ana Maria".into(),
                    email: "ana@example.com".into(),
                    password: None,
                    role: Role::Admin,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn password_update_requires_the_current_password() {
        let users = service(Arc::new(FakeUserRepo::new()));
        users.create(new_user("ana@example.com")).await.unwrap();

        let wrong = users
            .update_password("ana@example.com", "wrong-pass", "brand-new-pass")
            .await;
        assert!(matches!(wrong, Err(DomainError::Validation(_))));

        let changed = users
            .update_password("ana@example.com", "s3cret-pass", "brand-new-pass")
            .await
            .unwrap();
        assert_eq!(changed.password_hash, "hashed:brand-new-pass");
    }

    #[tokio::test]
    async fn password_update_rejects_short_replacements() {
        let users = service(Arc::new(FakeUserRepo::new()));
        users.create(new_user("ana@example.com")).await.unwrap();

        let result = users
            .update_password("ana@example.com", "s3cret-pass", "tiny")
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
