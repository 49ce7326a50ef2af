//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod products;
mod users;

use actix_web::web;
use serde::Deserialize;

use catalog_core::domain::{DEFAULT_PAGE_SIZE, PageRequest, Sort};

use crate::middleware::error::AppResult;

/// Pagination query parameters (`page`, `size`, `sort=field` or
/// `sort=field,desc`).
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    page: Option<u64>,
    size: Option<u64>,
    sort: Option<String>,
}

impl PageQuery {
    /// Default ordering is newest first, matching the collection
    /// listings' behavior.
    pub(crate) fn into_request(self) -> AppResult<PageRequest> {
        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::desc("created_at"),
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            Some(sort),
        ))
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/context", web::get().to(auth::context))
                    .route("/password", web::put().to(auth::update_password)),
            )
            // Catalog routes - v2 first so `/v2/...` is not swallowed by
            // the v1 scope's `{id}` matcher.
            .service(
                web::scope("/v2/products")
                    .route("", web::get().to(products::list_v2))
                    .route("", web::post().to(products::create_v2))
                    .route(
                        "/categories/{category_id}",
                        web::get().to(products::by_category_v2),
                    )
                    .route("/{id}", web::get().to(products::get_v2))
                    .route("/{id}", web::put().to(products::update_v2))
                    .route("/{id}", web::delete().to(products::delete_v2)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(products::list))
                    .route("", web::post().to(products::create))
                    .route(
                        "/categories/{category_id}",
                        web::get().to(products::by_category),
                    )
                    .route("/{id}", web::get().to(products::get))
                    .route("/{id}", web::put().to(products::update))
                    .route("/{id}", web::delete().to(products::delete)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("", web::post().to(users::create))
                    .route("/{id}", web::get().to(users::get))
                    .route("/{id}", web::put().to(users::update))
                    .route("/{id}", web::delete().to(users::delete)),
            ),
    );
}
