//! User management handlers (admin only; see the route policy).

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use catalog_core::domain::{NewUser, UserUpdate};
use catalog_shared::dto::{UserRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let user = state.users.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let password = req
        .password
        .ok_or_else(|| AppError::BadRequest("password is required".to_string()))?;

    let user = state
        .users
        .create(NewUser {
            name: req.name,
            email: req.email,
            password,
            role: req.role,
        })
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .users
        .update(
            path.into_inner(),
            UserUpdate {
                name: req.name,
                email: req.email,
                password: req.password,
                role: req.role,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
