use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Product entity. `code` is globally unique and never null once the
/// product is persisted; its external form is produced by
/// [`crate::domain::code`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: bool,
    pub code: i32,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from a validated input. A missing status
    /// defaults to active.
    pub fn new(input: ProductInput, code: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            status: input.status.unwrap_or(true),
            code,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create/update payload for products.
///
/// `code` and `status` are optional with a different meaning per
/// operation: on create a missing code is a validation failure and a
/// missing status defaults to active; on update both fall back to the
/// persisted value.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: Option<bool>,
    pub code: Option<i32>,
    pub category_id: Uuid,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if self.name.chars().count() > 100 {
            return Err(DomainError::Validation(
                "name must be at most 100 characters".into(),
            ));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > 255 {
                return Err(DomainError::Validation(
                    "description must be at most 255 characters".into(),
                ));
            }
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::Validation("price must be positive".into()));
        }
        Ok(())
    }
}
