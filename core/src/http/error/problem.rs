//! RFC 9457 problem detail body.
//!
//! # Spring Equivalent
//! `org.springframework.http.ProblemDetail`

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Media type of a problem detail body.
pub const PROBLEM_JSON: &str = "application/problem+json";

const ABOUT_BLANK: &str = "about:blank";

/// Structured error body: status, short title and a human readable detail.
///
/// # Example
/// ```
/// use actix_web::http::StatusCode;
/// use demo_rest_security::http::error::ProblemDetail;
///
/// let problem = ProblemDetail::for_status_and_detail(StatusCode::FORBIDDEN, "Access Denied")
///     .with_instance("/auth/admin");
///
/// assert_eq!(problem.title, "Forbidden");
/// assert_eq!(problem.status, 403);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type", default = "about_blank")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

fn about_blank() -> String {
    ABOUT_BLANK.to_string()
}

impl ProblemDetail {
    /// Creates a problem for `status`, titled with the status reason phrase.
    pub fn for_status(status: StatusCode) -> Self {
        ProblemDetail {
            type_uri: about_blank(),
            title: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn for_status_and_detail(status: StatusCode, detail: impl Into<String>) -> Self {
        let mut problem = Self::for_status(status);
        problem.detail = Some(detail.into());
        problem
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Renders the problem as an `application/problem+json` response.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(PROBLEM_JSON)
            .json(self)
    }
}
