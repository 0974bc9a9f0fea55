//! CORS layer built from [`CorsSettings`].

use actix_cors::Cors;
use actix_web::http::header::HeaderName;
use actix_web::http::Method;
use log::debug;

use crate::config::CorsSettings;

/// Build the CORS middleware from configuration.
pub fn build_cors(settings: &CorsSettings) -> Cors {
    let mut cors = Cors::default();

    if settings.allowed_origins.is_empty() || settings.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &settings.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", settings.allowed_origins);
    }

    let methods: Vec<Method> = settings
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    if settings.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> = settings
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }
    }

    if !settings.expose_headers.is_empty() {
        let expose: Vec<HeaderName> = settings
            .expose_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.expose_headers(expose);
    }

    if settings.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors.max_age(settings.max_age as usize)
}
