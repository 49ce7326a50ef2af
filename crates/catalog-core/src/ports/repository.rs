use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Page, PageRequest, Product, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are distinct because ids are assigned at entity
/// construction: an upsert-style save could not tell a create from an
/// update.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository - the credential store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Case-sensitive lookup by email, the unique login key.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;
}

/// Category repository with paged reads.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Category>, RepoError>;
}

/// Product repository with paged reads and the code-existence check.
#[async_trait]
pub trait ProductRepository: BaseRepository<Product, Uuid> {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, RepoError>;

    async fn find_by_category_page(
        &self,
        category_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError>;

    /// Existence check backing the friendly duplicate-code error. The
    /// unique index on the code column stays the authoritative guard.
    async fn exists_by_code(&self, code: i32) -> Result<bool, RepoError>;
}
