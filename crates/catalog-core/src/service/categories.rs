//! Category catalog service: cached reads and write-then-invalidate
//! writes.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{Category, CategoryInput, Page, PageRequest};
use crate::error::DomainError;
use crate::ports::{Cache, CategoryRepository};

use super::keys;

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
}

impl CategoryService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            cache_ttl,
        }
    }

    pub async fn find_page(&self, request: &PageRequest) -> Result<Page<Category>, DomainError> {
        let key = keys::category_page(request);
        super::read_through(
            self.cache.as_ref(),
            &key,
            self.cache_ttl,
            self.repo.find_page(request),
        )
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category, DomainError> {
        let key = keys::category_item(id);
        super::read_through_item(
            self.cache.as_ref(),
            &key,
            self.cache_ttl,
            "category",
            id,
            self.repo.find_by_id(id),
        )
        .await
    }

    pub async fn create(&self, input: CategoryInput) -> Result<Category, DomainError> {
        input.validate()?;

        let created = self.repo.insert(Category::new(input)).await?;
        tracing::info!(category_id = %created.id, "category created");

        self.invalidate(created.id).await;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: CategoryInput) -> Result<Category, DomainError> {
        input.validate()?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "category",
                id,
            })?;

        let updated = Category {
            id,
            name: input.name,
            description: input.description,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now(),
        };

        let saved = self.repo.update(updated).await?;
        self.invalidate(id).await;
        Ok(saved)
    }

    /// Deleting a category does not cascade to its products; referential
    /// policy lives in the store.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        self.invalidate(id).await;
        Ok(())
    }

    async fn invalidate(&self, id: Uuid) {
        let item_key = keys::category_item(id);
        super::evict(self.cache.as_ref(), &item_key, &keys::CATEGORY_WRITE_SCOPES).await;
    }
}
