//! Demo REST application secured with `demo-rest-security`.
//!
//! Three endpoints under `/auth`, HTTP Basic authentication against users
//! read from the configuration file, and no server-side session.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod security;
