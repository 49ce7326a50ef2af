//! Product catalog service: cached reads, write-then-invalidate writes,
//! and the product-code uniqueness enforcement.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{Page, PageRequest, Product, ProductInput};
use crate::error::DomainError;
use crate::ports::{Cache, ProductRepository};

use super::keys;

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>, cache: Arc<dyn Cache>, cache_ttl: Duration) -> Self {
        Self {
            repo,
            cache,
            cache_ttl,
        }
    }

    pub async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError> {
        let key = keys::product_page(request);
        super::read_through(
            self.cache.as_ref(),
            &key,
            self.cache_ttl,
            self.repo.find_page(request),
        )
        .await
    }

    pub async fn find_by_category_page(
        &self,
        category_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let key = keys::products_by_category(category_id, request);
        super::read_through(
            self.cache.as_ref(),
            &key,
            self.cache_ttl,
            self.repo.find_by_category_page(category_id, request),
        )
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Product, DomainError> {
        let key = keys::product_item(id);
        super::read_through_item(
            self.cache.as_ref(),
            &key,
            self.cache_ttl,
            "product",
            id,
            self.repo.find_by_id(id),
        )
        .await
    }

    /// Create a product. The submitted code must not collide with an
    /// existing one; the check-then-act window between the existence
    /// check and the insert is closed by the store's unique index, which
    /// turns a racing insert into a constraint error.
    pub async fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        let code = input
            .code
            .ok_or_else(|| DomainError::Validation("code must not be null".into()))?;

        if self.repo.exists_by_code(code).await? {
            return Err(DomainError::DuplicateCode(code));
        }

        let created = self.repo.insert(Product::new(input, code)).await?;
        tracing::info!(product_id = %created.id, code = created.code, "product created");

        self.invalidate(created.id).await;
        Ok(created)
    }

    /// Update a product. Resubmitting the unchanged code is not a
    /// duplicate; an omitted code or status keeps the persisted value.
    pub async fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "product",
                id,
            })?;

        let code = match input.code {
            Some(code) if code != existing.code => {
                if self.repo.exists_by_code(code).await? {
                    return Err(DomainError::DuplicateCode(code));
                }
                code
            }
            Some(code) => code,
            None => existing.code,
        };

        let updated = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            status: input.status.unwrap_or(existing.status),
            code,
            category_id: input.category_id,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now(),
        };

        let saved = self.repo.update(updated).await?;
        self.invalidate(id).await;
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        self.invalidate(id).await;
        Ok(())
    }

    /// Runs only after the repository write succeeded, and completes
    /// before the result is returned to the caller.
    async fn invalidate(&self, id: Uuid) {
        let item_key = keys::product_item(id);
        super::evict(self.cache.as_ref(), &item_key, &keys::PRODUCT_WRITE_SCOPES).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryInput, Sort};
    use crate::service::CategoryService;
    use crate::service::test_support::{FakeCache, FakeCategoryRepo, FakeProductRepo};
    use rust_decimal::Decimal;

    fn input(code: Option<i32>) -> ProductInput {
        ProductInput {
            name: "X1".into(),
            description: None,
            price: Decimal::new(10000, 2),
            status: None,
            code,
            category_id: Uuid::new_v4(),
        }
    }

    fn service(repo: Arc<FakeProductRepo>, cache: Arc<FakeCache>) -> ProductService {
        ProductService::new(repo, cache, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn create_defaults_status_to_active() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo, Arc::new(FakeCache::new()));

        let created = products.create(input(Some(7))).await.unwrap();

        assert!(created.status);
        assert_eq!(created.code, 7);
    }

    #[tokio::test]
    async fn create_requires_a_code() {
        let products = service(Arc::new(FakeProductRepo::new()), Arc::new(FakeCache::new()));

        let result = products.create(input(None)).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code_without_writing() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo.clone(), Arc::new(FakeCache::new()));
        products.create(input(Some(7))).await.unwrap();

        let result = products.create(input(Some(7))).await;

        assert!(matches!(result, Err(DomainError::DuplicateCode(7))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn update_accepts_the_unchanged_code() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo, Arc::new(FakeCache::new()));
        let created = products.create(input(Some(7))).await.unwrap();

        let updated = products
            .update(
                created.id,
                ProductInput {
                    price: Decimal::new(15000, 2),
                    code: Some(7),
                    ..input(Some(7))
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.code, 7);
        assert_eq!(updated.price, Decimal::new(15000, 2));
    }

    #[tokio::test]
    async fn update_preserves_code_and_status_when_omitted() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo, Arc::new(FakeCache::new()));
        let created = products
            .create(ProductInput {
                status: Some(false),
                ..input(Some(7))
            })
            .await
            .unwrap();

        let updated = products
            .update(
                created.id,
                ProductInput {
                    code: None,
                    status: None,
                    ..input(None)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.code, 7);
        assert!(!updated.status);
    }

    #[tokio::test]
    async fn update_rejects_a_code_held_by_another_product() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo, Arc::new(FakeCache::new()));
        products.create(input(Some(7))).await.unwrap();
        let second = products.create(input(Some(8))).await.unwrap();

        let result = products.update(second.id, input(Some(7))).await;

        assert!(matches!(result, Err(DomainError::DuplicateCode(7))));
    }

    #[tokio::test]
    async fn page_reads_use_distinct_keys_per_page() {
        let repo = Arc::new(FakeProductRepo::new());
        let cache = Arc::new(FakeCache::new());
        let products = service(repo, cache.clone());

        let first = PageRequest::new(0, 10, None);
        let second = PageRequest::new(1, 10, None);
        products.find_page(&first).await.unwrap();
        products.find_page(&second).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&keys::product_page(&first)));
        assert!(cache.contains(&keys::product_page(&second)));
    }

    #[tokio::test]
    async fn update_invalidates_item_and_page_entries() {
        let repo = Arc::new(FakeProductRepo::new());
        let cache = Arc::new(FakeCache::new());
        let products = service(repo, cache.clone());
        let created = products.create(input(Some(7))).await.unwrap();

        let request = PageRequest::new(0, 10, Some(Sort::desc("created_at")));
        products.find_page(&request).await.unwrap();
        products.find_by_id(created.id).await.unwrap();
        assert!(cache.contains(&keys::product_page(&request)));
        assert!(cache.contains(&keys::product_item(created.id)));

        products
            .update(
                created.id,
                ProductInput {
                    price: Decimal::new(15000, 2),
                    code: None,
                    ..input(None)
                },
            )
            .await
            .unwrap();

        assert!(!cache.contains(&keys::product_page(&request)));
        assert!(!cache.contains(&keys::product_item(created.id)));

        let page = products.find_page(&request).await.unwrap();
        assert_eq!(page.content[0].price, Decimal::new(15000, 2));
    }

    #[tokio::test]
    async fn failed_update_leaves_the_cache_untouched() {
        let repo = Arc::new(FakeProductRepo::new());
        let cache = Arc::new(FakeCache::new());
        let products = service(repo, cache.clone());
        products.create(input(Some(7))).await.unwrap();
        let second = products.create(input(Some(8))).await.unwrap();

        let request = PageRequest::default();
        products.find_page(&request).await.unwrap();
        assert!(cache.contains(&keys::product_page(&request)));

        let result = products.update(second.id, input(Some(7))).await;

        assert!(result.is_err());
        assert!(cache.contains(&keys::product_page(&request)));
    }

    #[tokio::test]
    async fn reads_survive_a_broken_cache() {
        let repo = Arc::new(FakeProductRepo::new());
        let products = service(repo.clone(), Arc::new(FakeCache::failing()));
        let created = products.create(input(Some(7))).await.unwrap();

        assert!(products.find_page(&PageRequest::default()).await.is_ok());
        assert!(products.find_by_id(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn cached_pages_are_served_verbatim() {
        let repo = Arc::new(FakeProductRepo::new());
        let cache = Arc::new(FakeCache::new());
        let products = service(repo.clone(), cache);
        products.create(input(Some(7))).await.unwrap();

        let request = PageRequest::default();
        let first = products.find_page(&request).await.unwrap();

        // A write that bypasses the service cannot reach cached readers.
        repo.push_raw(Product::new(input(Some(8)), 8));

        let second = products.find_page(&request).await.unwrap();
        assert_eq!(second.total_elements, first.total_elements);
    }

    #[tokio::test]
    async fn catalog_flow_keeps_category_listings_fresh() {
        let cache = Arc::new(FakeCache::new());
        let product_repo = Arc::new(FakeProductRepo::new());
        let products = service(product_repo, cache.clone());
        let categories = CategoryService::new(
            Arc::new(FakeCategoryRepo::new()),
            cache.clone(),
            Duration::from_secs(60),
        );

        let phones = categories
            .create(CategoryInput {
                name: "Phones".into(),
                description: None,
            })
            .await
            .unwrap();

        let created = products
            .create(ProductInput {
                category_id: phones.id,
                ..input(Some(7))
            })
            .await
            .unwrap();
        assert!(created.status);
        assert_eq!(crate::domain::code::encode(created.code), "PROD-007");

        let duplicate = products
            .create(ProductInput {
                category_id: phones.id,
                ..input(Some(7))
            })
            .await;
        assert!(matches!(duplicate, Err(DomainError::DuplicateCode(7))));

        let request = PageRequest::default();
        let listing = products
            .find_by_category_page(phones.id, &request)
            .await
            .unwrap();
        assert_eq!(listing.content[0].price, Decimal::new(10000, 2));

        products
            .update(
                created.id,
                ProductInput {
                    price: Decimal::new(15000, 2),
                    code: None,
                    category_id: phones.id,
                    ..input(None)
                },
            )
            .await
            .unwrap();

        let listing = products
            .find_by_category_page(phones.id, &request)
            .await
            .unwrap();
        assert_eq!(listing.content[0].price, Decimal::new(15000, 2));
        assert_eq!(listing.content[0].code, 7);
    }
}
