//! The auth gate: bearer-token authentication and role authorization.
//!
//! A [`Transform`] middleware consults the route policy table, validates
//! the bearer token and either attaches the resolved [`Identity`] to the
//! request or short-circuits with 401/403. Handlers receive the identity
//! through the extractor - never through ambient global state.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};

use catalog_core::domain::Role;
use catalog_core::ports::{AuthError, TokenService};
use catalog_shared::ErrorResponse;

use super::policy::{self, Access};

/// Identity resolved by the gate.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) => ready(Ok(identity.clone())),
            None => {
                // Only reachable from a route the gate let through
                // unauthenticated.
                let response = HttpResponse::Unauthorized().json(ErrorResponse::unauthorized());
                ready(Err(actix_web::error::InternalError::from_response(
                    "unauthenticated",
                    response,
                )
                .into()))
            }
        }
    }
}

/// Auth gate middleware factory.
pub struct AuthGate {
    tokens: Arc<dyn TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let access = policy::required_access(req.method(), req.path());

        if access == Access::Public {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let identity = match authenticate(self.tokens.as_ref(), &req) {
            Ok(identity) => identity,
            Err(e) => {
                // Malformed, tampered and expired tokens are logged apart
                // but indistinguishable to the caller.
                tracing::debug!(path = %req.path(), error = %e, "authentication rejected");
                return reject(
                    req,
                    HttpResponse::Unauthorized().json(ErrorResponse::unauthorized()),
                );
            }
        };

        if access == Access::AdminOnly && !identity.is_admin() {
            tracing::debug!(path = %req.path(), subject = %identity.email, "authorization rejected");
            return reject(
                req,
                HttpResponse::Forbidden().json(ErrorResponse::forbidden()),
            );
        }

        req.extensions_mut().insert(identity);
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

/// Pull the bearer token off the request and validate it.
fn authenticate(tokens: &dyn TokenService, req: &ServiceRequest) -> Result<Identity, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let token = header_value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = tokens.validate(token)?;
    Ok(Identity {
        email: claims.subject,
        role: claims.role,
    })
}

fn reject<B: 'static>(
    req: ServiceRequest,
    response: HttpResponse,
) -> Pin<Box<dyn Future<Output = Result<ServiceResponse<EitherBody<B>>, Error>>>> {
    let (http_req, _payload) = req.into_parts();
    let service_response = ServiceResponse::new(http_req, response).map_into_right_body();
    Box::pin(async move { Ok(service_response) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};
    use catalog_infra::auth::{JwtConfig, JwtTokenService};

    fn tokens() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "gate-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "gate-test".to_string(),
        }))
    }

    async fn ok_handler() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.email)
    }

    macro_rules! gate_app {
        ($tokens:expr) => {
            test::init_service(
                App::new()
                    .wrap(AuthGate::new($tokens))
                    .route("/api/health", web::get().to(ok_handler))
                    .route("/api/products", web::get().to(ok_handler))
                    .route("/api/products", web::post().to(ok_handler))
                    .route("/api/auth/context", web::get().to(whoami)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn public_routes_skip_authentication() {
        let app = gate_app!(tokens());

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
            .await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn missing_token_is_unauthenticated() {
        let app = gate_app!(tokens());

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request())
                .await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn tampered_token_is_unauthenticated() {
        let tokens = tokens();
        let mut token = tokens.issue("ana@example.com", Role::Admin).unwrap();
        token.push('x');
        let app = gate_app!(tokens);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/products")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn user_tokens_read_but_cannot_mutate() {
        let tokens = tokens();
        let token = tokens.issue("ana@example.com", Role::User).unwrap();
        let app = gate_app!(tokens);

        let read = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/products")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert!(read.status().is_success());

        let write = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/products")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert_eq!(write.status(), 403);
    }

    #[actix_web::test]
    async fn admin_tokens_pass_the_admin_checkpoint() {
        let tokens = tokens();
        let token = tokens.issue("root@example.com", Role::Admin).unwrap();
        let app = gate_app!(tokens);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/products")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn the_gate_attaches_the_identity_for_handlers() {
        let tokens = tokens();
        let token = tokens.issue("ana@example.com", Role::User).unwrap();
        let app = gate_app!(tokens);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/context")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, "ana@example.com");
    }
}
