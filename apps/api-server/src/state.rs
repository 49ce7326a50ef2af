//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use catalog_core::error::RepoError;
use catalog_core::ports::{Cache, PasswordService, TokenService};
use catalog_core::service::{AuthService, CategoryService, ProductService, UserService};
use catalog_infra::auth::{Argon2PasswordService, JwtTokenService};
use catalog_infra::cache::{InMemoryCache, RedisCache, RedisConfig};
use catalog_infra::database::{
    self, DatabaseConfig, PostgresCategoryRepository, PostgresProductRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Wire the concrete adapters into the services.
    pub async fn new(db_config: &DatabaseConfig, cache_ttl: Duration) -> Result<Self, RepoError> {
        let db = database::connect(db_config).await?;

        let redis_config = RedisConfig::from_env();
        let cache: Arc<dyn Cache> = match RedisCache::new(redis_config.clone()).await {
            Ok(redis) => Arc::new(redis),
            Err(e) if redis_config.fallback_to_memory => {
                tracing::warn!(error = %e, "Redis unavailable, falling back to in-memory cache");
                Arc::new(InMemoryCache::new())
            }
            Err(e) => return Err(RepoError::Connection(e.to_string())),
        };

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
        let product_repo = Arc::new(PostgresProductRepository::new(db.clone()));
        let category_repo = Arc::new(PostgresCategoryRepository::new(db));

        let state = Self {
            products: Arc::new(ProductService::new(
                product_repo,
                cache.clone(),
                cache_ttl,
            )),
            categories: Arc::new(CategoryService::new(category_repo, cache, cache_ttl)),
            auth: Arc::new(AuthService::new(
                user_repo.clone(),
                passwords.clone(),
                tokens.clone(),
            )),
            users: Arc::new(UserService::new(user_repo, passwords)),
            tokens,
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
