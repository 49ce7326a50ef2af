//! Authentication and authorization ports.

use crate::domain::Role;

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// The user's email.
    pub subject: String,
    pub role: Role,
    pub exp: i64,
}

/// Token codec: issues and validates signed, stateless bearer tokens.
/// No server-side session state exists; a token is valid for its full
/// lifetime once issued.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for a subject and role.
    fn issue(&self, subject: &str, role: Role) -> Result<String, AuthError>;

    /// Recompute the signature and decode the claims. Rejects tokens that
    /// are structurally malformed, carry a bad signature, or are at or
    /// past their expiry.
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors. The token failures stay distinct for internal
/// logging; the auth gate collapses all of them into a single
/// unauthenticated outcome before anything reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature invalid")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Hashing error: {0}")]
    Hashing(String),
}
