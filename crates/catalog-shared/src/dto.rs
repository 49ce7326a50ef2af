//! Data Transfer Objects - request/response types for the API.
//!
//! Wire fields are camelCase. The v1 product types carry the external
//! `PROD-NNN` code form and convert through the code codec; the v2 types
//! expose the raw integer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_core::DomainError;
use catalog_core::domain::{Category, Page, Product, ProductInput, Role, User, code};

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Self-service password change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response containing the issued bearer token and the user it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// A user's public information. The password hash never leaves the
/// server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Admin-side user create/update payload. A missing password on update
/// keeps the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
}

/// Category create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryRequest> for catalog_core::domain::CategoryInput {
    fn from(request: CategoryRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Product payload with the external `PROD-NNN` code form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: Option<bool>,
    pub code: Option<String>,
    pub category_id: Uuid,
}

impl ProductRequest {
    /// Decode the external code form; fails with `InvalidCodeFormat` on
    /// anything the encoder could not have produced.
    pub fn into_input(self) -> Result<ProductInput, DomainError> {
        let decoded = self.code.as_deref().map(code::decode).transpose()?;
        Ok(ProductInput {
            name: self.name,
            description: self.description,
            price: self.price,
            status: self.status,
            code: decoded,
            category_id: self.category_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub code: String,
    pub status: bool,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            code: code::encode(product.code),
            status: product.status,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Product payload with the raw integer code (v2 surface).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductV2Request {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: Option<bool>,
    pub code: Option<i32>,
    pub category_id: Uuid,
}

impl From<ProductV2Request> for ProductInput {
    fn from(request: ProductV2Request) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            status: request.status,
            code: request.code,
            category_id: request.category_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductV2Response {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub code: i32,
    pub status: bool,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductV2Response {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            code: product.code,
            status: product.status,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Paginated collection envelope: `{content, page, size, totalElements}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<S: Into<T>>(page: Page<S>) -> Self {
        Self {
            content: page.content.into_iter().map(Into::into).collect(),
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "X1".into(),
            description: None,
            price: Decimal::new(10000, 2),
            status: true,
            code: 7,
            category_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn v1_response_renders_the_external_code_form() {
        let response = ProductResponse::from(product());
        assert_eq!(response.code, "PROD-007");
    }

    #[test]
    fn v2_response_keeps_the_raw_code() {
        let response = ProductV2Response::from(product());
        assert_eq!(response.code, 7);
    }

    #[test]
    fn request_rejects_a_malformed_code() {
        let request = ProductRequest {
            name: "X1".into(),
            description: None,
            price: Decimal::new(10000, 2),
            status: None,
            code: Some("PRD-7".into()),
            category_id: Uuid::new_v4(),
        };
        assert!(matches!(
            request.into_input(),
            Err(DomainError::InvalidCodeFormat(_))
        ));
    }

    #[test]
    fn request_decodes_the_external_code_form() {
        let request = ProductRequest {
            name: "X1".into(),
            description: None,
            price: Decimal::new(10000, 2),
            status: None,
            code: Some("PROD-007".into()),
            category_id: Uuid::new_v4(),
        };
        assert_eq!(request.into_input().unwrap().code, Some(7));
    }

    #[test]
    fn page_envelope_uses_the_wire_field_names() {
        let page = Page {
            content: vec![product()],
            page: 0,
            size: 10,
            total_elements: 1,
        };
        let response = PageResponse::<ProductResponse>::from_page(page);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["content"][0]["code"], "PROD-007");
        assert_eq!(json["content"][0]["categoryId"].is_string(), true);
    }
}
