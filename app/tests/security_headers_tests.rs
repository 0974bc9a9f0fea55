//! Security and CORS headers on the assembled application.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;

use common::{basic_auth, create_app_with, create_test_app, test_settings};

#[actix_web::test]
async fn test_security_headers_on_success() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/auth/welcome").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "0");
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "no-cache, no-store, max-age=0, must-revalidate"
    );
}

#[actix_web::test]
async fn test_security_headers_on_rejection() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/auth/admin")
        .insert_header(("Authorization", basic_auth("user", "password")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(resp.headers().get("pragma").unwrap(), "no-cache");
}

#[actix_web::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/auth/welcome")
        .insert_header((header::ORIGIN, "http://example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://example.com"
    );
}

#[actix_web::test]
async fn test_cors_preflight_needs_no_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/auth/admin")
        .insert_header((header::ORIGIN, "http://example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
}

#[actix_web::test]
async fn test_cors_restricted_origins() {
    let mut settings = test_settings();
    settings.cors.allowed_origins = vec!["http://localhost:3000".to_string()];
    let app = create_app_with(settings).await;

    let req = test::TestRequest::get()
        .uri("/auth/welcome")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let req = test::TestRequest::get()
        .uri("/auth/welcome")
        .insert_header((header::ORIGIN, "http://evil.example"))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    match resp {
        Ok(resp) => {
            assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }
        Err(err) => {
            assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
