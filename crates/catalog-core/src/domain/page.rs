use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Paginated result envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
}

/// Sort specification for a collection read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }

    /// Parse the `field` / `field,asc` / `field,desc` query form.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.splitn(2, ',');
        let field = parts.next().unwrap_or("").trim();
        if field.is_empty() {
            return Err(DomainError::Validation(
                "sort field must not be empty".into(),
            ));
        }
        let descending = match parts.next().map(str::trim) {
            None | Some("") | Some("asc") => false,
            Some("desc") => true,
            Some(other) => {
                return Err(DomainError::Validation(format!(
                    "sort direction must be 'asc' or 'desc', got '{other}'"
                )));
            }
        };
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }

    fn render(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}:{}", self.field, direction)
    }
}

/// Pagination parameters for collection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Build a request, clamping the size into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u64, size: u64, sort: Option<Sort>) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    /// Deterministic token identifying this request inside cache keys.
    /// Identical parameters render identically; any differing parameter
    /// changes the token.
    pub fn cache_token(&self) -> String {
        let sort = self
            .sort
            .as_ref()
            .map(Sort::render)
            .unwrap_or_else(|| "unsorted".to_string());
        format!("{}-{}-{}", self.page, self.size, sort)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, None)
    }
}
