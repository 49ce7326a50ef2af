//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use uuid::Uuid;

use catalog_core::domain::{Category, Page, PageRequest, Product, Sort, User};
use catalog_core::error::RepoError;
use catalog_core::ports::{CategoryRepository, ProductRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::product::{self, Entity as ProductEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL product repository.
pub type PostgresProductRepository = PostgresBaseRepository<ProductEntity>;

/// Run a paged query: one count, one page fetch.
async fn paged<E, T>(
    db: &DbConn,
    query: Select<E>,
    request: &PageRequest,
) -> Result<Page<T>, RepoError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    T: From<E::Model>,
{
    let paginator = query.paginate(db, request.size);
    let total_elements = paginator
        .num_items()
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;
    let models = paginator
        .fetch_page(request.page)
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    Ok(Page {
        content: models.into_iter().map(Into::into).collect(),
        page: request.page,
        size: request.size,
        total_elements,
    })
}

fn product_sort_column(sort: &Sort) -> Result<product::Column, RepoError> {
    match sort.field.as_str() {
        "name" => Ok(product::Column::Name),
        "price" => Ok(product::Column::Price),
        "code" => Ok(product::Column::Code),
        "status" => Ok(product::Column::Status),
        "created_at" => Ok(product::Column::CreatedAt),
        "updated_at" => Ok(product::Column::UpdatedAt),
        other => Err(RepoError::UnsupportedSort(other.to_string())),
    }
}

fn category_sort_column(sort: &Sort) -> Result<category::Column, RepoError> {
    match sort.field.as_str() {
        "name" => Ok(category::Column::Name),
        "created_at" => Ok(category::Column::CreatedAt),
        "updated_at" => Ok(category::Column::UpdatedAt),
        other => Err(RepoError::UnsupportedSort(other.to_string())),
    }
}

fn order_products(
    query: Select<ProductEntity>,
    request: &PageRequest,
) -> Result<Select<ProductEntity>, RepoError> {
    match &request.sort {
        Some(sort) => {
            let column = product_sort_column(sort)?;
            Ok(if sort.descending {
                query.order_by_desc(column)
            } else {
                query.order_by_asc(column)
            })
        }
        None => Ok(query),
    }
}

fn order_categories(
    query: Select<CategoryEntity>,
    request: &PageRequest,
) -> Result<Select<CategoryEntity>, RepoError> {
    match &request.sort {
        Some(sort) => {
            let column = category_sort_column(sort)?;
            Ok(if sort.descending {
                query.order_by_desc(column)
            } else {
                query.order_by_asc(column)
            })
        }
        None => Ok(query),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, RepoError> {
        let query = order_products(ProductEntity::find(), request)?;
        paged(&self.db, query, request).await
    }

    async fn find_by_category_page(
        &self,
        category_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError> {
        let query = order_products(
            ProductEntity::find().filter(product::Column::CategoryId.eq(category_id)),
            request,
        )?;
        paged(&self.db, query, request).await
    }

    async fn exists_by_code(&self, code: i32) -> Result<bool, RepoError> {
        let count = ProductEntity::find()
            .filter(product::Column::Code.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(count > 0)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Category>, RepoError> {
        let query = order_categories(CategoryEntity::find(), request)?;
        paged(&self.db, query, request).await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the address so lookups don't leak PII into logs.
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(count > 0)
    }
}

fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = if local.len() > 1 {
            format!("{}***", &local[..1])
        } else {
            "***".to_string()
        };
        format!("{masked_local}{domain}")
    } else {
        "***".to_string()
    }
}
