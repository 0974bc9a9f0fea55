//! Translation of security failures into HTTP responses.
//!
//! # Spring Security Equivalent
//! `ExceptionTranslationFilter` with an `AuthenticationEntryPoint` and an
//! `AccessDeniedHandler`, both resolved by a `@RestControllerAdvice` into a
//! `ProblemDetail`

use actix_web::http::header;
use actix_web::HttpResponse;
use log::debug;

use crate::http::error::AuthError;
use crate::http::security::http_basic::HttpBasicConfig;

/// Maps [`AuthError`] kinds to problem detail responses.
///
/// - `AuthenticationRequired` -> `401 Unauthorized`
/// - `AccessDenied` -> `403 Forbidden`
///
/// The `detail` is the error message verbatim and `instance` is the request
/// path.
#[derive(Clone, Debug, Default)]
pub struct ExceptionTranslator {
    basic_challenge: Option<HttpBasicConfig>,
}

impl ExceptionTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `WWW-Authenticate` challenge to 401 responses.
    pub fn basic_challenge(mut self, config: HttpBasicConfig) -> Self {
        self.basic_challenge = Some(config);
        self
    }

    pub fn translate(&self, path: &str, error: &AuthError) -> HttpResponse {
        debug!("security failure on {}: {}", path, error);

        let mut response = error.to_problem_detail(Some(path)).into_response();
        if let (AuthError::AuthenticationRequired { .. }, Some(basic)) = (error, &self.basic_challenge) {
            if let Ok(value) = header::HeaderValue::from_str(&basic.www_authenticate_header()) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}
