//! One-time data seeding at startup.

use catalog_core::domain::{NewUser, Role};
use catalog_core::service::UserService;

use crate::config::AdminBootstrapConfig;

/// Create the well-known admin account exactly once if absent. Failures
/// are logged, not fatal - the server still serves whoever can log in.
pub async fn ensure_admin(users: &UserService, config: &AdminBootstrapConfig) {
    match users.find_by_email(&config.email).await {
        Ok(Some(_)) => tracing::info!("Admin account already present"),
        Ok(None) => {
            let admin = NewUser {
                name: "Admin".to_string(),
                email: config.email.clone(),
                password: config.password.clone(),
                role: Role::Admin,
            };
            match users.create(admin).await {
                Ok(user) => tracing::info!(user_id = %user.id, "Admin account created"),
                Err(e) => tracing::error!(error = %e, "Failed to create admin account"),
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to check for admin account"),
    }
}
