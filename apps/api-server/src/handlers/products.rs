//! Product handlers - the v1 surface renders codes as `PROD-NNN`
//! strings, the v2 surface exposes the raw integer.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use catalog_shared::dto::{
    PageResponse, ProductRequest, ProductResponse, ProductV2Request, ProductV2Response,
};

use crate::handlers::PageQuery;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/products
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let request = query.into_inner().into_request()?;
    let page = state.products.find_page(&request).await?;
    Ok(HttpResponse::Ok().json(PageResponse::<ProductResponse>::from_page(page)))
}

/// GET /api/products/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let product = state.products.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// GET /api/products/categories/{category_id}
pub async fn by_category(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let request = query.into_inner().into_request()?;
    let page = state
        .products
        .find_by_category_page(path.into_inner(), &request)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::<ProductResponse>::from_page(page)))
}

/// POST /api/products
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<ProductRequest>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner().into_input()?;
    let product = state.products.create(input).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner().into_input()?;
    let product = state.products.update(path.into_inner(), input).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.products.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v2/products
pub async fn list_v2(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let request = query.into_inner().into_request()?;
    let page = state.products.find_page(&request).await?;
    Ok(HttpResponse::Ok().json(PageResponse::<ProductV2Response>::from_page(page)))
}

/// GET /api/v2/products/{id}
pub async fn get_v2(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let product = state.products.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductV2Response::from(product)))
}

/// GET /api/v2/products/categories/{category_id}
pub async fn by_category_v2(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let request = query.into_inner().into_request()?;
    let page = state
        .products
        .find_by_category_page(path.into_inner(), &request)
        .await?;
    Ok(HttpResponse::Ok().json(PageResponse::<ProductV2Response>::from_page(page)))
}

/// POST /api/v2/products
pub async fn create_v2(
    state: web::Data<AppState>,
    body: web::Json<ProductV2Request>,
) -> AppResult<HttpResponse> {
    let product = state.products.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ProductV2Response::from(product)))
}

/// PUT /api/v2/products/{id}
pub async fn update_v2(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ProductV2Request>,
) -> AppResult<HttpResponse> {
    let product = state
        .products
        .update(path.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ProductV2Response::from(product)))
}

/// DELETE /api/v2/products/{id}
pub async fn delete_v2(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.products.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
