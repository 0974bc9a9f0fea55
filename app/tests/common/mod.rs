//! Common test utilities and configuration.
//!
//! The test app is wired exactly like `main`: filter chain, security
//! headers, CORS, then the `/auth` routes.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::{test, App};
use base64::prelude::*;

use demo_rest::config::{SecuritySettings, UserSettings};
use demo_rest::{handlers, middleware, security};
use demo_rest_security::http::security::SecurityHeaders;

/// Users:
/// - user/password: USER
/// - admin/admin: ADMIN
/// - guest/guest: no role
pub fn test_settings() -> SecuritySettings {
    SecuritySettings {
        users: vec![
            test_user("user", "password", &["USER"]),
            test_user("admin", "admin", &["ADMIN"]),
            test_user("guest", "guest", &[]),
        ],
        ..SecuritySettings::default()
    }
}

fn test_user(username: &str, password: &str, roles: &[&str]) -> UserSettings {
    UserSettings {
        username: username.to_string(),
        password: format!("{{noop}}{}", password),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        authorities: Vec::new(),
    }
}

/// Helper function to create Basic Auth header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    create_app_with(test_settings()).await
}

pub async fn create_app_with(
    settings: SecuritySettings,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(security::filter_chain(&settings))
            .wrap(SecurityHeaders::default())
            .wrap(middleware::build_cors(&settings.cors))
            .configure(handlers::configure),
    )
    .await
}
