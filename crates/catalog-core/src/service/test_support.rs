//! In-memory fakes of the ports for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Page, PageRequest, Product, Role, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, Cache, CacheError, CategoryRepository, PasswordService,
    ProductRepository, TokenClaims, TokenService, UserRepository,
};

/// Cache fake backed by a plain map. `failing()` builds one whose every
/// operation misbehaves, for the degradation tests.
#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    broken: bool,
}

impl FakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            broken: true,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl Cache for FakeCache {
    async fn get(&self, key: &str) -> Option<String> {
        if self.broken {
            return None;
        }
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        if self.broken {
            return Err(CacheError::Operation("broken cache".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.broken {
            return Err(CacheError::Operation("broken cache".into()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        if self.broken {
            return Err(CacheError::Operation("broken cache".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

fn slice_page<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let start = (request.page * request.size) as usize;
    let content = items
        .iter()
        .skip(start)
        .take(request.size as usize)
        .cloned()
        .collect();
    Page {
        content,
        page: request.page,
        size: request.size,
        total_elements: items.len() as u64,
    }
}

/// Product repository fake with the same uniqueness backstop the real
/// store has on the code column.
#[derive(Default)]
pub struct FakeProductRepo {
    products: Mutex<Vec<Product>>,
}

impl FakeProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    /// Push straight into the store, bypassing the service (and its cache
    /// invalidation).
    pub fn push_raw(&self, product: Product) {
        self.products.lock().unwrap().push(product);
    }
}

#[async_trait]
impl BaseRepository<Product, Uuid> for FakeProductRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert(&self, entity: Product) -> Result<Product, RepoError> {
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.code == entity.code) {
            return Err(RepoError::Constraint("products_code_key".into()));
        }
        products.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Product) -> Result<Product, RepoError> {
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for FakeProductRepo {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, RepoError> {
        Ok(slice_page(&self.products.lock().unwrap(), request))
    }

    async fn find_by_category_page(
        &self,
        category_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<Product>, RepoError> {
        let products = self.products.lock().unwrap();
        let filtered: Vec<Product> = products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        Ok(slice_page(&filtered, request))
    }

    async fn exists_by_code(&self, code: i32) -> Result<bool, RepoError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.code == code))
    }
}

#[derive(Default)]
pub struct FakeCategoryRepo {
    categories: Mutex<Vec<Category>>,
}

impl FakeCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for FakeCategoryRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert(&self, entity: Category) -> Result<Category, RepoError> {
        self.categories.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Category) -> Result<Category, RepoError> {
        let mut categories = self.categories.lock().unwrap();
        let slot = categories
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for FakeCategoryRepo {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Category>, RepoError> {
        Ok(slice_page(&self.categories.lock().unwrap(), request))
    }
}

#[derive(Default)]
pub struct FakeUserRepo {
    users: Mutex<Vec<User>>,
}

impl FakeUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for FakeUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == entity.email) {
            return Err(RepoError::Constraint("users_email_key".into()));
        }
        users.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeUserRepo {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email))
    }
}

/// Transparent password "hashing" so tests can assert against hashes.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Token codec fake issuing inspectable tokens.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, subject: &str, role: Role) -> Result<String, AuthError> {
        Ok(format!("token:{subject}:{role}"))
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let rest = token
            .strip_prefix("token:")
            .ok_or(AuthError::SignatureInvalid)?;
        let (subject, role) = rest
            .rsplit_once(':')
            .ok_or_else(|| AuthError::Malformed("missing role".into()))?;
        let role = role
            .parse::<Role>()
            .map_err(|_| AuthError::Malformed("unknown role".into()))?;
        Ok(TokenClaims {
            subject: subject.to_string(),
            role,
            exp: i64::MAX,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}
