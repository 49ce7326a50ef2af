//! Cache-key policy for the catalog.
//!
//! Every cacheable read derives its key here and every write invalidates
//! through the scopes below, so the whole contract is auditable in one
//! place. Two reads with identical logical parameters produce identical
//! keys; any differing parameter produces a different key.

use uuid::Uuid;

use crate::domain::PageRequest;

/// Single-product entries.
pub const PRODUCT_ITEM_PREFIX: &str = "product:";
/// Paginated product listings.
pub const PRODUCT_PAGE_PREFIX: &str = "products:page:";
/// Category-scoped product listings.
pub const PRODUCTS_BY_CATEGORY_PREFIX: &str = "products:category:";
/// Single-category entries.
pub const CATEGORY_ITEM_PREFIX: &str = "category:";
/// Paginated category listings.
pub const CATEGORY_PAGE_PREFIX: &str = "categories:page:";

pub fn product_item(id: Uuid) -> String {
    format!("{PRODUCT_ITEM_PREFIX}{id}")
}

pub fn product_page(request: &PageRequest) -> String {
    format!("{PRODUCT_PAGE_PREFIX}{}", request.cache_token())
}

pub fn products_by_category(category_id: Uuid, request: &PageRequest) -> String {
    format!(
        "{PRODUCTS_BY_CATEGORY_PREFIX}{category_id}:{}",
        request.cache_token()
    )
}

pub fn category_item(id: Uuid) -> String {
    format!("{CATEGORY_ITEM_PREFIX}{id}")
}

pub fn category_page(request: &PageRequest) -> String {
    format!("{CATEGORY_PAGE_PREFIX}{}", request.cache_token())
}

/// Prefixes evicted after any product write. The item entry is deleted
/// by exact key; collection pages go coarsely by prefix - correctness
/// over precision.
pub const PRODUCT_WRITE_SCOPES: [&str; 2] = [PRODUCT_PAGE_PREFIX, PRODUCTS_BY_CATEGORY_PREFIX];

/// Prefixes evicted after any category write. Category-scoped product
/// listings are keyed by category id, so they go too.
pub const CATEGORY_WRITE_SCOPES: [&str; 2] = [CATEGORY_PAGE_PREFIX, PRODUCTS_BY_CATEGORY_PREFIX];
