//! Route access policy.
//!
//! The single authoritative table mapping (method, path) to the required
//! access level. First match wins; anything unlisted requires an
//! authenticated caller.

use actix_web::http::Method;

/// Access level required for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// Any authenticated role.
    Authenticated,
    /// The `admin` role only.
    AdminOnly,
}

struct Rule {
    /// `None` matches every method.
    method: Option<Method>,
    prefix: &'static str,
    access: Access,
}

static RULES: &[Rule] = &[
    Rule {
        method: None,
        prefix: "/api/auth/login",
        access: Access::Public,
    },
    Rule {
        method: None,
        prefix: "/api/auth/register",
        access: Access::Public,
    },
    Rule {
        method: None,
        prefix: "/api/health",
        access: Access::Public,
    },
    Rule {
        method: None,
        prefix: "/api/auth/context",
        access: Access::Authenticated,
    },
    Rule {
        method: None,
        prefix: "/api/auth/password",
        access: Access::Authenticated,
    },
    // Catalog reads are open to every authenticated role; the admin
    // catch-alls below cover the mutations.
    Rule {
        method: Some(Method::GET),
        prefix: "/api/products",
        access: Access::Authenticated,
    },
    Rule {
        method: Some(Method::GET),
        prefix: "/api/v2/products",
        access: Access::Authenticated,
    },
    Rule {
        method: Some(Method::GET),
        prefix: "/api/categories",
        access: Access::Authenticated,
    },
    Rule {
        method: None,
        prefix: "/api/products",
        access: Access::AdminOnly,
    },
    Rule {
        method: None,
        prefix: "/api/v2/products",
        access: Access::AdminOnly,
    },
    Rule {
        method: None,
        prefix: "/api/categories",
        access: Access::AdminOnly,
    },
    Rule {
        method: None,
        prefix: "/api/users",
        access: Access::AdminOnly,
    },
];

/// Resolve the access level required for a request.
pub fn required_access(method: &Method, path: &str) -> Access {
    for rule in RULES {
        let method_matches = rule.method.as_ref().map(|m| m == method).unwrap_or(true);
        if method_matches && path.starts_with(rule.prefix) {
            return rule.access;
        }
    }
    Access::Authenticated
}
