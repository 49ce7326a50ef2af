//! Authentication handlers.

use actix_web::{HttpResponse, web};

use catalog_core::service::AuthenticatedUser;
use catalog_shared::dto::{
    AuthResponse, LoginRequest, PasswordUpdateRequest, RegisterRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn auth_response(authenticated: AuthenticatedUser, expires_in: i64) -> AuthResponse {
    AuthResponse {
        access_token: authenticated.token,
        token_type: "Bearer".to_string(),
        expires_in: expires_in.max(0) as u64,
        user: UserResponse::from(authenticated.user),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let authenticated = state.auth.register(req.name, req.email, req.password).await?;

    Ok(HttpResponse::Created()
        .json(auth_response(authenticated, state.tokens.expiration_seconds())))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let authenticated = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok()
        .json(auth_response(authenticated, state.tokens.expiration_seconds())))
}

/// GET /api/auth/context
pub async fn context(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.auth.current_user(&identity.email).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/auth/password
pub async fn update_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PasswordUpdateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .users
        .update_password(&identity.email, &req.current_password, &req.new_password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
