//! # demo-rest security
//!
//! Request authentication and URL-based authorization for Actix Web, with
//! failures rendered as RFC 9457 problem details.
//!
//! - [`http::security`] - authentication, authorization and middleware
//! - [`http::error`] - error kinds and the problem detail body

pub mod http;
