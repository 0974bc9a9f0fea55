//! Security middleware for Actix Web.
//!
//! # Spring Equivalent
//! `SecurityFilterChain` / `FilterChainProxy`

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::error::AuthError;
use crate::http::security::config::{Authenticator, Authorizer};
use crate::http::security::exception::ExceptionTranslator;

/// Security middleware factory.
///
/// Every request runs through: authenticate, store the user in the request
/// extensions, authorize, then either forward to the handler or answer with
/// the translated failure. Nothing is kept between requests.
///
/// The factory is cheap to clone: workers share one authenticator and one
/// authorizer.
///
/// # Example
/// ```ignore
/// App::new().wrap(
///     SecurityTransform::new()
///         .config_authenticator(authenticator)
///         .config_authorizer(authorizer)
///         .exception_translator(ExceptionTranslator::new())
/// )
/// ```
pub struct SecurityTransform<Auth, Autho> {
    authenticator: Option<Arc<Auth>>,
    authorizer: Option<Arc<Autho>>,
    translator: ExceptionTranslator,
}

impl<Auth, Autho> SecurityTransform<Auth, Autho> {
    pub fn new() -> Self {
        SecurityTransform {
            authenticator: None,
            authorizer: None,
            translator: ExceptionTranslator::new(),
        }
    }

    pub fn config_authenticator(mut self, authenticator: Auth) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn config_authorizer(mut self, authorizer: Autho) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// # Spring Equivalent
    /// `HttpSecurity.exceptionHandling(...)`
    pub fn exception_translator(mut self, translator: ExceptionTranslator) -> Self {
        self.translator = translator;
        self
    }
}

impl<Auth, Autho> Default for SecurityTransform<Auth, Autho> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Auth, Autho> Clone for SecurityTransform<Auth, Autho> {
    fn clone(&self) -> Self {
        SecurityTransform {
            authenticator: self.authenticator.clone(),
            authorizer: self.authorizer.clone(),
            translator: self.translator.clone(),
        }
    }
}

impl<S, B, Auth, Autho> Transform<S, ServiceRequest> for SecurityTransform<Auth, Autho>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + 'static,
    Autho: Authorizer + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<Auth, Autho, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            authenticator: self.authenticator.clone(),
            authorizer: self.authorizer.clone(),
            translator: self.translator.clone(),
            service: Rc::new(service),
        })
    }
}

/// Security middleware service.
///
/// # Spring Equivalent
/// `FilterChainProxy`
pub struct SecurityService<Auth, Autho, S> {
    authenticator: Option<Arc<Auth>>,
    authorizer: Option<Arc<Autho>>,
    translator: ExceptionTranslator,
    service: Rc<S>,
}

impl<Auth, Autho, S> SecurityService<Auth, Autho, S> {
    fn reject<B: 'static>(
        &self,
        req: ServiceRequest,
        error: AuthError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let response = self.translator.translate(req.path(), &error);
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}

impl<Auth, Autho, S, B> Service<ServiceRequest> for SecurityService<Auth, Autho, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
    Autho: Authorizer,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Step 1: Authenticate. Rejected credentials end the request here,
        // before any authorization rule is consulted.
        let user = match &self.authenticator {
            Some(auth) => match auth.authenticate(&req) {
                Ok(user) => user,
                Err(error) => return self.reject(req, error),
            },
            None => None,
        };

        // Step 2: Make the user available to the AuthenticatedUser extractor
        if let Some(ref u) = user {
            req.extensions_mut().insert(u.clone());
        }

        // Step 3: Authorize on the path the router resolves, with
        // percent-encoded unreserved characters already decoded.
        if let Some(authorizer) = &self.authorizer {
            let path = req.match_info().as_str();
            if let Err(error) = authorizer.authorize(req.method(), path, user.as_ref()) {
                return self.reject(req, error);
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
