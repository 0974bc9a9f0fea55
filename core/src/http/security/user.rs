//! Authenticated identity.
//!
//! # Spring Equivalent
//! `UserDetails` interface

use std::fmt;

const ROLE_PREFIX: &str = "ROLE_";

fn normalize_role(role: &str) -> &str {
    role.strip_prefix(ROLE_PREFIX).unwrap_or(role)
}

/// A user with an encoded password, roles and authorities.
///
/// Roles are stored without the `ROLE_` prefix, so `ROLE_ADMIN` and `ADMIN`
/// name the same role.
///
/// # Example
/// ```
/// use demo_rest_security::http::security::User;
///
/// let user = User::new("admin".into(), "{noop}password".into())
///     .roles(&["ROLE_ADMIN".into(), "USER".into()])
///     .authorities(&["reports:read".into()]);
///
/// assert!(user.has_role("ADMIN"));
/// assert!(user.has_role("ROLE_USER"));
/// assert!(user.has_authority("reports:read"));
/// ```
#[derive(Clone, Debug)]
pub struct User {
    username: String,
    password: String,
    roles: Vec<String>,
    authorities: Vec<String>,
}

impl User {
    pub fn new(username: String, password: String) -> Self {
        User {
            username,
            password,
            roles: Vec::new(),
            authorities: Vec::new(),
        }
    }

    /// Creates a user from an already encoded password, e.g. `{bcrypt}$2a$10$...`.
    pub fn with_encoded_password(username: &str, encoded_password: String) -> Self {
        User::new(username.to_string(), encoded_password)
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the encoded password.
    pub fn get_password(&self) -> &str {
        &self.password
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    pub fn get_authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Adds roles, skipping ones already present.
    pub fn roles(mut self, roles: &[String]) -> Self {
        for role in roles {
            let role = normalize_role(role);
            if !self.has_role(role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Adds authorities, skipping ones already present.
    pub fn authorities(mut self, authorities: &[String]) -> Self {
        for authority in authorities {
            if !self.authorities.contains(authority) {
                self.authorities.push(authority.clone());
            }
        }
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        let role = normalize_role(role);
        self.roles.iter().any(|r| r == role)
    }

    /// OR semantics.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// AND semantics; vacuously true for an empty list.
    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        authorities.iter().any(|auth| self.has_authority(auth))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, roles: {:?}, authorities: {:?} }}",
            self.username, self.roles, self.authorities
        )
    }
}
