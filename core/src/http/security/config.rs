//! Configuration traits for authentication and authorization.
//!
//! # Spring Equivalent
//! `AuthenticationProvider` and `AuthorizationManager` interfaces

use actix_web::dev::ServiceRequest;
use actix_web::http::Method;

use crate::http::error::AuthError;
use crate::http::security::user::User;

/// Resolves the caller's identity from a request.
///
/// # Implementation Note
/// Implementations must not keep per-client state between calls: every
/// request carries its own credentials.
pub trait Authenticator {
    /// - `Ok(Some(user))`: credentials present and verified
    /// - `Ok(None)`: no credentials, the request is anonymous
    /// - `Err(_)`: credentials present but rejected
    fn authenticate(&self, req: &ServiceRequest) -> Result<Option<User>, AuthError>;
}

/// Decides whether a caller may reach a resource.
///
/// A pure function of its inputs: the same method, path and identity always
/// produce the same decision.
pub trait Authorizer {
    fn authorize(&self, method: &Method, path: &str, user: Option<&User>) -> Result<(), AuthError>;
}
