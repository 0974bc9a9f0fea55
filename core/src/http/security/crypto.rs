//! Password encoding.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.crypto.password.PasswordEncoder`
//! and `PasswordEncoderFactories.createDelegatingPasswordEncoder()`

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use derive_more::{Display, Error};
use log::warn;

/// Hashing a password failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("failed to encode password: {reason}")]
pub struct EncodeError {
    reason: String,
}

impl EncodeError {
    fn new(reason: impl ToString) -> Self {
        EncodeError {
            reason: reason.to_string(),
        }
    }
}

/// Encodes passwords for storage and checks raw passwords against them.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError>;

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;

    /// Returns true if the stored hash should be re-encoded.
    fn upgrade_encoding(&self, _encoded_password: &str) -> bool {
        false
    }
}

/// Argon2id with the crate's default parameters.
///
/// # Example
/// ```
/// use demo_rest_security::http::security::crypto::{Argon2PasswordEncoder, PasswordEncoder};
///
/// let encoder = Argon2PasswordEncoder::new();
/// let hash = encoder.encode("secret").unwrap();
/// assert!(encoder.matches("secret", &hash));
/// assert!(!encoder.matches("guess", &hash));
/// ```
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(EncodeError::new)
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        match PasswordHash::new(encoded_password) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(raw_password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// BCrypt with a configurable cost (log rounds).
#[derive(Clone)]
pub struct BCryptPasswordEncoder {
    cost: u32,
}

impl BCryptPasswordEncoder {
    /// Default cost 10.
    pub fn new() -> Self {
        Self { cost: 10 }
    }

    /// Cost is clamped to 4..=31.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    fn hash_cost(encoded_password: &str) -> Option<u32> {
        // $2a$NN$...
        if !encoded_password.starts_with("$2") {
            return None;
        }
        encoded_password.get(4..6)?.parse().ok()
    }
}

impl Default for BCryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BCryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError> {
        bcrypt::hash(raw_password, self.cost).map_err(EncodeError::new)
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        bcrypt::verify(raw_password, encoded_password).unwrap_or(false)
    }

    fn upgrade_encoding(&self, encoded_password: &str) -> bool {
        match Self::hash_cost(encoded_password) {
            Some(cost) => cost < self.cost,
            None => true,
        }
    }
}

/// Plain text. Tests and local development only.
#[derive(Clone, Copy, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError> {
        Ok(raw_password.to_string())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }
}

/// Algorithm used by [`DelegatingPasswordEncoder`] for new hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefaultEncoder {
    #[default]
    BCrypt,
    Argon2,
}

impl DefaultEncoder {
    fn id(self) -> &'static str {
        match self {
            DefaultEncoder::BCrypt => "bcrypt",
            DefaultEncoder::Argon2 => "argon2",
        }
    }
}

/// Picks the algorithm from the `{id}` prefix of the stored hash.
///
/// Recognised ids are `bcrypt`, `argon2` and `noop`. A hash without an id, or
/// with an id nothing is registered for, never matches.
///
/// # Example
/// ```
/// use demo_rest_security::http::security::crypto::{DelegatingPasswordEncoder, PasswordEncoder};
///
/// let encoder = DelegatingPasswordEncoder::new();
/// assert!(encoder.matches("plain", "{noop}plain"));
/// assert!(!encoder.matches("plain", "plain"));
/// ```
#[derive(Clone, Default)]
pub struct DelegatingPasswordEncoder {
    bcrypt: BCryptPasswordEncoder,
    argon2: Argon2PasswordEncoder,
    default_encoder: DefaultEncoder,
}

impl DelegatingPasswordEncoder {
    /// New hashes use bcrypt.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_encoder(mut self, encoder: DefaultEncoder) -> Self {
        self.default_encoder = encoder;
        self
    }

    fn split_id(encoded_password: &str) -> Option<(&str, &str)> {
        let rest = encoded_password.strip_prefix('{')?;
        rest.split_once('}')
    }

    fn delegate(&self, id: &str) -> Option<&dyn PasswordEncoder> {
        match id {
            "bcrypt" => Some(&self.bcrypt),
            "argon2" => Some(&self.argon2),
            "noop" => Some(&NoOpPasswordEncoder),
            _ => None,
        }
    }
}

impl PasswordEncoder for DelegatingPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, EncodeError> {
        let encoded = match self.default_encoder {
            DefaultEncoder::BCrypt => self.bcrypt.encode(raw_password)?,
            DefaultEncoder::Argon2 => self.argon2.encode(raw_password)?,
        };
        Ok(format!("{{{}}}{}", self.default_encoder.id(), encoded))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let Some((id, hash)) = Self::split_id(encoded_password) else {
            warn!("stored password has no {{id}} prefix, rejecting");
            return false;
        };
        match self.delegate(id) {
            Some(encoder) => encoder.matches(raw_password, hash),
            None => {
                warn!("no password encoder mapped for id \"{}\"", id);
                false
            }
        }
    }

    fn upgrade_encoding(&self, encoded_password: &str) -> bool {
        match Self::split_id(encoded_password) {
            Some((id, hash)) if id == self.default_encoder.id() => self
                .delegate(id)
                .is_some_and(|encoder| encoder.upgrade_encoding(hash)),
            _ => true,
        }
    }
}
