//! Security filter chain of the application.
//!
//! # Spring Equivalent
//! `@Configuration @EnableWebSecurity` class exposing a `SecurityFilterChain`,
//! a `PasswordEncoder` and a `UserDetailsService`

use demo_rest_security::http::security::{
    Access, DelegatingPasswordEncoder, ExceptionTranslator, HttpBasicConfig, MemoryAuthenticator,
    RequestMatcherAuthorizer, SecurityTransform, User,
};
use log::info;

use crate::config::SecuritySettings;

pub type SecurityFilterChain = SecurityTransform<MemoryAuthenticator, RequestMatcherAuthorizer>;

/// URL rules, evaluated top to bottom:
///
/// | pattern         | rule                 |
/// |-----------------|----------------------|
/// | `/auth/welcome` | permit all           |
/// | `/auth/user`    | has role `USER`      |
/// | `/auth/admin`   | has role `ADMIN`     |
/// | anything else   | authenticated        |
pub fn authorizer() -> RequestMatcherAuthorizer {
    RequestMatcherAuthorizer::new()
        .request_matchers(&["/auth/welcome"], Access::permit_all())
        .request_matchers(&["/auth/user"], Access::has_role("USER"))
        .request_matchers(&["/auth/admin"], Access::has_role("ADMIN"))
        .any_request(Access::authenticated())
}

/// New hashes use bcrypt; stored hashes may be `{bcrypt}`, `{argon2}` or `{noop}`.
pub fn password_encoder() -> DelegatingPasswordEncoder {
    DelegatingPasswordEncoder::new()
}

/// In-memory users from the configuration.
pub fn authenticator(settings: &SecuritySettings) -> MemoryAuthenticator {
    let authenticator = settings.users.iter().fold(
        MemoryAuthenticator::new().password_encoder(password_encoder()),
        |authenticator, user| {
            authenticator.with_user(
                User::with_encoded_password(&user.username, user.password.clone())
                    .roles(&user.roles)
                    .authorities(&user.authorities),
            )
        },
    );
    info!("{} in-memory user(s) configured", authenticator.user_count());
    authenticator
}

pub fn exception_translator(settings: &SecuritySettings) -> ExceptionTranslator {
    let translator = ExceptionTranslator::new();
    if settings.basic_challenge {
        translator.basic_challenge(HttpBasicConfig::new().realm(&settings.realm))
    } else {
        translator
    }
}

/// Stateless HTTP Basic chain: every request is authenticated from its own
/// `Authorization` header.
pub fn filter_chain(settings: &SecuritySettings) -> SecurityFilterChain {
    SecurityTransform::new()
        .config_authenticator(authenticator(settings))
        .config_authorizer(authorizer())
        .exception_translator(exception_translator(settings))
}
