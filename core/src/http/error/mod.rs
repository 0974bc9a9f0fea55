//! Security error kinds and their HTTP representation.
//!
//! # Spring Equivalent
//! `AuthenticationException` / `AccessDeniedException` and `ProblemDetail`

mod auth_error;
mod problem;

pub use auth_error::{AuthError, ACCESS_DENIED, BAD_CREDENTIALS, FULL_AUTHENTICATION_REQUIRED};
pub use problem::{ProblemDetail, PROBLEM_JSON};
