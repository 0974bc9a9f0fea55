//! Security module providing authentication and authorization.
//!
//! # Spring Equivalent
//! `org.springframework.security` package
//!
//! # Module Structure
//!
//! - `authenticator` - HTTP Basic authentication against in-memory users
//! - `authorizer` - Ordered URL rules (RequestMatcherAuthorizer)
//! - `config` - Core traits (Authenticator, Authorizer)
//! - `crypto` - Password encoding (BCrypt, Argon2, NoOp, Delegating)
//! - `exception` - Failure to problem detail translation
//! - `extractor` - Actix Web extractors (AuthenticatedUser, OptionalUser)
//! - `headers` - Default security response headers
//! - `http_basic` - HTTP Basic credential parsing
//! - `matcher` - Ant, regex and catch-all request matchers
//! - `middleware` - Security middleware (SecurityTransform)
//! - `user` - User model

pub use authenticator::MemoryAuthenticator;
pub use authorizer::{Access, RequestMatcherAuthorizer};
pub use config::{Authenticator, Authorizer};
pub use crypto::{
    Argon2PasswordEncoder, BCryptPasswordEncoder, DefaultEncoder, DelegatingPasswordEncoder,
    EncodeError, NoOpPasswordEncoder, PasswordEncoder,
};
pub use exception::ExceptionTranslator;
pub use extractor::{AuthenticatedUser, OptionalUser, SecurityExt};
pub use headers::SecurityHeaders;
pub use http_basic::HttpBasicConfig;
pub use matcher::RequestMatcher;
pub use middleware::SecurityTransform;
pub use user::User;

mod config;
mod extractor;
mod user;

pub mod authenticator;
pub mod authorizer;
pub mod crypto;
pub mod exception;
pub mod headers;
pub mod http_basic;
pub mod matcher;
pub mod middleware;
