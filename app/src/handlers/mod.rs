use actix_web::web;

pub mod auth;

/// Registers every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::welcome)
            .service(auth::user)
            .service(auth::admin),
    );
}
