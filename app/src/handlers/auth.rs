//! `/auth` endpoints. Access is decided by the filter chain before these run.

use actix_web::{get, HttpResponse, Responder};
use demo_rest_security::http::security::{AuthenticatedUser, OptionalUser};

/// Public.
#[get("/welcome")]
pub async fn welcome(principal: OptionalUser) -> impl Responder {
    match principal.into_inner() {
        Some(principal) => {
            HttpResponse::Ok().body(format!("Welcome, {}!", principal.get_username()))
        }
        None => HttpResponse::Ok().body("Welcome!"),
    }
}

/// Requires role `USER`.
#[get("/user")]
pub async fn user(principal: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("User: {}", principal.get_username()))
}

/// Requires role `ADMIN`.
#[get("/admin")]
pub async fn admin(principal: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin: {}", principal.get_username()))
}
