//! HTTP Basic Authentication support (RFC 7617).
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.authentication.www.BasicAuthenticationFilter`

use actix_web::dev::ServiceRequest;
use actix_web::http;
use base64::prelude::*;

use crate::http::error::AuthError;

const BASIC_SCHEME: &str = "basic";

/// `Basic` scheme with nothing after it.
pub const EMPTY_TOKEN: &str = "Empty basic authentication token";

/// Base64 in the header did not decode.
pub const UNDECODABLE_TOKEN: &str = "Failed to decode basic authentication token";
/// Decoded token had no `:` separator.
pub const INVALID_TOKEN: &str = "Invalid basic authentication token";

/// Reads `Authorization: Basic <base64(username:password)>`.
///
/// Returns `Ok(None)` when the request carries no Basic credentials at all
/// (no header, or another scheme), so it proceeds as anonymous. A Basic header
/// that cannot be parsed is an authentication failure.
pub fn extract_basic_credentials(
    req: &ServiceRequest,
) -> Result<Option<(String, String)>, AuthError> {
    let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let Ok(value) = header.to_str() else {
        return Ok(None);
    };
    let value = value.trim();
    if value.eq_ignore_ascii_case(BASIC_SCHEME) {
        return Err(AuthError::authentication_required(EMPTY_TOKEN));
    }
    let Some(token) = strip_scheme(value) else {
        return Ok(None);
    };

    decode_token(token.trim()).map(Some)
}

/// Returns what follows `Basic<whitespace>`, if the value uses that scheme.
fn strip_scheme(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(|c: char| c.is_ascii_whitespace())?;
    scheme.eq_ignore_ascii_case(BASIC_SCHEME).then_some(token)
}

fn decode_token(token: &str) -> Result<(String, String), AuthError> {
    let decoded = BASE64_STANDARD
        .decode(token)
        .map_err(|_| AuthError::authentication_required(UNDECODABLE_TOKEN))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::authentication_required(UNDECODABLE_TOKEN))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::authentication_required(INVALID_TOKEN))?;

    Ok((username.to_string(), password.to_string()))
}

/// HTTP Basic configuration.
///
/// # Spring Security Equivalent
/// `HttpSecurity.httpBasic()`
#[derive(Clone, Debug)]
pub struct HttpBasicConfig {
    realm: String,
}

impl HttpBasicConfig {
    /// Default realm "Realm".
    pub fn new() -> Self {
        HttpBasicConfig {
            realm: "Realm".to_string(),
        }
    }

    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    /// Value for the `WWW-Authenticate` challenge.
    pub fn www_authenticate_header(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for HttpBasicConfig {
    fn default() -> Self {
        Self::new()
    }
}
