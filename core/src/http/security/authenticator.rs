//! In-memory user store.
//!
//! # Spring Security Equivalent
//! `InMemoryUserDetailsManager` behind a `BasicAuthenticationFilter`

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use log::{debug, warn};

use crate::http::error::{AuthError, BAD_CREDENTIALS};
use crate::http::security::config::Authenticator;
use crate::http::security::crypto::{DelegatingPasswordEncoder, PasswordEncoder};
use crate::http::security::http_basic::extract_basic_credentials;
use crate::http::security::user::User;

/// Authenticates HTTP Basic credentials against users held in memory.
///
/// # Example
/// ```
/// use demo_rest_security::http::security::{MemoryAuthenticator, User};
///
/// let authenticator = MemoryAuthenticator::new()
///     .with_user(User::with_encoded_password("admin", "{noop}admin".into()).roles(&["ADMIN".into()]));
///
/// assert!(authenticator.verify_credentials("admin", "admin").is_some());
/// assert!(authenticator.verify_credentials("admin", "guess").is_none());
/// ```
#[derive(Clone)]
pub struct MemoryAuthenticator {
    users: HashMap<String, User>,
    password_encoder: Arc<dyn PasswordEncoder>,
}

impl MemoryAuthenticator {
    /// No users; passwords checked with a [`DelegatingPasswordEncoder`].
    pub fn new() -> Self {
        MemoryAuthenticator {
            users: HashMap::new(),
            password_encoder: Arc::new(DelegatingPasswordEncoder::new()),
        }
    }

    pub fn password_encoder<E: PasswordEncoder + 'static>(mut self, encoder: E) -> Self {
        self.password_encoder = Arc::new(encoder);
        self
    }

    /// Adds a user. A second user with the same name is ignored.
    pub fn with_user(mut self, user: User) -> Self {
        use std::collections::hash_map::Entry;
        match self.users.entry(user.get_username().to_string()) {
            Entry::Occupied(e) => {
                warn!("user {} already exists, skipping", e.key());
            }
            Entry::Vacant(e) => {
                e.insert(user);
            }
        }
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns the user if the password matches its stored hash.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Option<User> {
        let user = self.users.get(username)?;
        if self.password_encoder.matches(password, user.get_password()) {
            Some(user.clone())
        } else {
            None
        }
    }
}

impl Default for MemoryAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for MemoryAuthenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Result<Option<User>, AuthError> {
        let Some((username, password)) = extract_basic_credentials(req)? else {
            return Ok(None);
        };

        match self.verify_credentials(&username, &password) {
            Some(user) => Ok(Some(user)),
            None => {
                debug!("basic authentication failed for user {}", username);
                Err(AuthError::authentication_required(BAD_CREDENTIALS))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test::TestRequest;
    use base64::prelude::*;

    use super::*;
    use crate::http::security::crypto::NoOpPasswordEncoder;

    fn authenticator() -> MemoryAuthenticator {
        MemoryAuthenticator::new()
            .with_user(User::with_encoded_password("user", "{noop}password".into()).roles(&["USER".into()]))
            .with_user(User::with_encoded_password("admin", "{noop}admin".into()).roles(&["ADMIN".into()]))
    }

    fn basic(username: &str, password: &str) -> ServiceRequest {
        let token = BASE64_STANDARD.encode(format!("{}:{}", username, password));
        TestRequest::default()
            .insert_header((AUTHORIZATION, format!("Basic {}", token)))
            .to_srv_request()
    }

    #[test]
    fn test_valid_credentials() {
        let user = authenticator().authenticate(&basic("user", "password")).unwrap();
        assert_eq!(user.map(|u| u.get_username().to_string()), Some("user".to_string()));
    }

    #[test]
    fn test_no_credentials_is_anonymous() {
        let req = TestRequest::default().to_srv_request();
        assert!(authenticator().authenticate(&req).unwrap().is_none());
    }

    #[test]
    fn test_wrong_password_is_bad_credentials() {
        let err = authenticator().authenticate(&basic("user", "nope")).unwrap_err();
        assert_eq!(err, AuthError::authentication_required(BAD_CREDENTIALS));
    }

    #[test]
    fn test_unknown_user_is_bad_credentials() {
        let err = authenticator().authenticate(&basic("mallory", "password")).unwrap_err();
        assert_eq!(err.message(), BAD_CREDENTIALS);
    }

    #[test]
    fn test_duplicate_user_keeps_first() {
        let authenticator = authenticator()
            .with_user(User::with_encoded_password("user", "{noop}other".into()));

        assert_eq!(authenticator.user_count(), 2);
        assert!(authenticator.verify_credentials("user", "password").is_some());
        assert!(authenticator.verify_credentials("user", "other").is_none());
    }

    #[test]
    fn test_custom_encoder() {
        let authenticator = MemoryAuthenticator::new()
            .password_encoder(NoOpPasswordEncoder)
            .with_user(User::new("plain".into(), "text".into()));

        assert!(authenticator.verify_credentials("plain", "text").is_some());
    }
}
