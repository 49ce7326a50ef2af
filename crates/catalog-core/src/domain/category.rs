use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Category entity. Owns zero or more products through the non-owning
/// `Product.category_id` back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with generated id and timestamps.
    pub fn new(input: CategoryInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create/update payload for categories.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
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
        Ok(())
    }
}
