//! Extractors for accessing the authenticated user in handlers.
//!
//! # Spring Equivalent
//! `@AuthenticationPrincipal` annotation

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::{AuthError, FULL_AUTHENTICATION_REQUIRED};
use crate::http::security::User;

/// The user stored by `SecurityTransform`.
///
/// # Errors
/// Responds `401 Unauthorized` with a problem detail body if the request is
/// anonymous.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    pub fn new(user: User) -> Self {
        AuthenticatedUser(user)
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => ready(Err(AuthError::authentication_required(
                FULL_AUTHENTICATION_REQUIRED,
            ))),
        }
    }
}

/// The user if there is one; never fails.
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<User>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<User> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<User>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(req.extensions().get::<User>().cloned())))
    }
}

/// Security checks directly on `HttpRequest`.
pub trait SecurityExt {
    fn get_user(&self) -> Option<User>;

    fn is_authenticated(&self) -> bool;

    fn has_role(&self, role: &str) -> bool;
}

impl SecurityExt for HttpRequest {
    fn get_user(&self) -> Option<User> {
        self.extensions().get::<User>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<User>().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<User>()
            .is_some_and(|u| u.has_role(role))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::ResponseError;

    use super::*;

    fn request_with(user: Option<User>) -> HttpRequest {
        let req = TestRequest::default().to_http_request();
        if let Some(u) = user {
            req.extensions_mut().insert(u);
        }
        req
    }

    #[actix_web::test]
    async fn test_authenticated_user_present() {
        let req = request_with(Some(User::new("ann".into(), "x".into()).roles(&["USER".into()])));
        let user = AuthenticatedUser::extract(&req).await.unwrap();

        assert_eq!(user.get_username(), "ann");
        assert!(req.has_role("USER"));
        assert!(req.is_authenticated());
    }

    #[actix_web::test]
    async fn test_authenticated_user_missing_is_401() {
        let req = request_with(None);
        let err = AuthenticatedUser::extract(&req).await.unwrap_err();

        assert_eq!(err.status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), FULL_AUTHENTICATION_REQUIRED);
    }

    #[actix_web::test]
    async fn test_optional_user() {
        let anonymous = OptionalUser::extract(&request_with(None)).await.unwrap();
        assert!(!anonymous.is_authenticated());

        let req = request_with(Some(User::new("bo".into(), "x".into())));
        let present = OptionalUser::extract(&req).await.unwrap();
        assert_eq!(present.into_inner().map(|u| u.get_username().to_string()), Some("bo".into()));
        assert!(req.get_user().is_some());
    }
}
