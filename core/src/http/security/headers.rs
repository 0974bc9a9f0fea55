//! Default security response headers.
//!
//! # Spring Security Equivalent
//! `HttpSecurity.headers()` with its defaults
//!
//! # Overview
//! Adds to every response, unless the handler already set the header:
//!
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `X-XSS-Protection: 0`
//! - `Cache-Control: no-cache, no-store, max-age=0, must-revalidate`,
//!   `Pragma: no-cache`, `Expires: 0`
//!
//! # Usage
//! ```ignore
//! use demo_rest_security::http::security::headers::SecurityHeaders;
//!
//! App::new().wrap(SecurityHeaders::default())
//! ```

use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::Error;

/// Which default headers are written.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    pub content_type_options: bool,
    pub frame_options: bool,
    pub xss_protection: bool,
    pub cache_control: bool,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        SecurityHeaders {
            content_type_options: true,
            frame_options: true,
            xss_protection: true,
            cache_control: true,
        }
    }
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable_content_type_options(mut self) -> Self {
        self.content_type_options = false;
        self
    }

    /// # Spring Security Equivalent
    /// `headers().frameOptions().disable()`
    pub fn disable_frame_options(mut self) -> Self {
        self.frame_options = false;
        self
    }

    pub fn disable_xss_protection(mut self) -> Self {
        self.xss_protection = false;
        self
    }

    /// # Spring Security Equivalent
    /// `headers().cacheControl().disable()`
    pub fn disable_cache_control(mut self) -> Self {
        self.cache_control = false;
        self
    }

    fn apply(&self, headers: &mut HeaderMap) {
        if self.content_type_options {
            set_if_absent(headers, header::X_CONTENT_TYPE_OPTIONS, "nosniff");
        }
        if self.frame_options {
            set_if_absent(headers, header::X_FRAME_OPTIONS, "DENY");
        }
        if self.xss_protection {
            set_if_absent(headers, header::X_XSS_PROTECTION, "0");
        }
        // The three cache headers go together; a handler that manages caching
        // itself keeps full control.
        if self.cache_control && !headers.contains_key(header::CACHE_CONTROL) {
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, max-age=0, must-revalidate"),
            );
            set_if_absent(headers, header::PRAGMA, "no-cache");
            set_if_absent(headers, header::EXPIRES, "0");
        }
    }
}

fn set_if_absent(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
    if !headers.contains_key(&name) {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecurityHeadersMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

/// Security headers middleware service.
pub struct SecurityHeadersMiddleware<S> {
    service: Rc<S>,
    config: SecurityHeaders,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config.clone();

        Box::pin(async move {
            let mut response = service.call(req).await?;
            config.apply(response.headers_mut());
            Ok(response)
        })
    }
}
