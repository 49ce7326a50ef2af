//! # Catalog Infrastructure
//!
//! Concrete implementations of the ports defined in `catalog-core`:
//! Postgres repositories via SeaORM, Redis and in-memory cache stores,
//! and the JWT/Argon2 authentication primitives.

pub mod auth;
pub mod cache;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use cache::{InMemoryCache, RedisCache, RedisConfig};
pub use database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresProductRepository, PostgresUserRepository,
};
