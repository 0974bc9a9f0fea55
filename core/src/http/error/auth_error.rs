use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};

use super::problem::ProblemDetail;

/// Message for a protected resource reached without any identity.
pub const FULL_AUTHENTICATION_REQUIRED: &str =
    "Full authentication is required to access this resource";
/// Message for an unknown user or a wrong password.
pub const BAD_CREDENTIALS: &str = "Bad credentials";
/// Message for an identity lacking the required role or authority.
pub const ACCESS_DENIED: &str = "Access Denied";

/// The two ways a request can fail security checks.
///
/// # Spring Equivalent
/// `AuthenticationException` (401) and `AccessDeniedException` (403)
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AuthError {
    /// No credentials, or credentials that could not be verified.
    #[display("{message}")]
    AuthenticationRequired { message: String },
    /// A verified identity without the privilege the resource requires.
    #[display("{message}")]
    AccessDenied { message: String },
}

impl AuthError {
    pub fn authentication_required(message: impl Into<String>) -> Self {
        AuthError::AuthenticationRequired {
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        AuthError::AccessDenied {
            message: message.into(),
        }
    }

    /// The message carried into the problem detail.
    pub fn message(&self) -> &str {
        match self {
            AuthError::AuthenticationRequired { message } | AuthError::AccessDenied { message } => {
                message
            }
        }
    }

    /// Builds the problem detail for this error, optionally naming the request path.
    pub fn to_problem_detail(&self, instance: Option<&str>) -> ProblemDetail {
        let problem = ProblemDetail::for_status_and_detail(self.status_code(), self.message());
        match instance {
            Some(path) => problem.with_instance(path),
            None => problem,
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::AuthenticationRequired { .. } => StatusCode::UNAUTHORIZED,
            AuthError::AccessDenied { .. } => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_problem_detail(None).into_response()
    }
}
