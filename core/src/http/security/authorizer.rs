//! Request matcher based authorization.
//!
//! # Spring Security Equivalent
//! `RequestMatcherDelegatingAuthorizationManager`, configured through
//! `HttpSecurity.authorizeHttpRequests(...)`

use actix_web::http::Method;
use log::{debug, warn};

use crate::http::error::{AuthError, ACCESS_DENIED, FULL_AUTHENTICATION_REQUIRED};
use crate::http::security::config::Authorizer;
use crate::http::security::matcher::RequestMatcher;
use crate::http::security::user::User;

/// What a caller needs to reach a matched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous callers.
    PermitAll,
    /// No one.
    DenyAll,
    /// Any authenticated identity.
    Authenticated,
    /// An identity holding at least one of the roles.
    HasAnyRole(Vec<String>),
    /// An identity holding at least one of the authorities.
    HasAnyAuthority(Vec<String>),
}

impl Access {
    pub fn permit_all() -> Self {
        Access::PermitAll
    }

    pub fn deny_all() -> Self {
        Access::DenyAll
    }

    pub fn authenticated() -> Self {
        Access::Authenticated
    }

    /// # Spring Security Equivalent
    /// `hasRole("ADMIN")`
    pub fn has_role(role: &str) -> Self {
        Access::has_any_role(&[role])
    }

    pub fn has_any_role(roles: &[&str]) -> Self {
        Access::HasAnyRole(roles.iter().map(|r| r.to_string()).collect())
    }

    pub fn has_authority(authority: &str) -> Self {
        Access::has_any_authority(&[authority])
    }

    pub fn has_any_authority(authorities: &[&str]) -> Self {
        Access::HasAnyAuthority(authorities.iter().map(|a| a.to_string()).collect())
    }

    /// Whether `user` satisfies this access rule.
    pub fn is_granted(&self, user: Option<&User>) -> bool {
        match (self, user) {
            (Access::PermitAll, _) => true,
            (_, None) | (Access::DenyAll, _) => false,
            (Access::Authenticated, Some(_)) => true,
            (Access::HasAnyRole(roles), Some(u)) => roles.iter().any(|r| u.has_role(r)),
            (Access::HasAnyAuthority(authorities), Some(u)) => {
                authorities.iter().any(|a| u.has_authority(a))
            }
        }
    }
}

static UNMATCHED: Access = Access::DenyAll;

#[derive(Debug, Clone)]
struct Rule {
    matcher: RequestMatcher,
    access: Access,
}

/// Ordered authorization rules, first match wins.
///
/// Rules are evaluated in the order they were added, never re-sorted, so more
/// specific patterns must be registered before broader ones. A request that
/// matches no rule is denied.
///
/// # Example
/// ```
/// use actix_web::http::Method;
/// use demo_rest_security::http::security::{Access, Authorizer, RequestMatcherAuthorizer};
///
/// let authorizer = RequestMatcherAuthorizer::new()
///     .request_matchers(&["/auth/welcome"], Access::permit_all())
///     .request_matchers(&["/auth/admin"], Access::has_role("ADMIN"))
///     .any_request(Access::authenticated());
///
/// assert!(authorizer.authorize(&Method::GET, "/auth/welcome", None).is_ok());
/// assert!(authorizer.authorize(&Method::GET, "/auth/admin", None).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestMatcherAuthorizer {
    rules: Vec<Rule>,
}

impl RequestMatcherAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one Ant-pattern rule per pattern, all with the same access.
    ///
    /// # Spring Security Equivalent
    /// `requestMatchers("/a", "/b").hasRole("X")`
    pub fn request_matchers(self, patterns: &[&str], access: Access) -> Self {
        patterns.iter().fold(self, |authorizer, pattern| {
            authorizer.add_matcher(RequestMatcher::ant(pattern), access.clone())
        })
    }

    /// Adds a rule for an arbitrary matcher.
    pub fn add_matcher(mut self, matcher: RequestMatcher, access: Access) -> Self {
        if self.has_catch_all() {
            warn!(
                "authorization rule for {} is registered after the catch-all rule and will never match",
                matcher
            );
        }
        self.rules.push(Rule { matcher, access });
        self
    }

    /// Adds the catch-all rule.
    ///
    /// # Spring Security Equivalent
    /// `anyRequest()`
    pub fn any_request(self, access: Access) -> Self {
        self.add_matcher(RequestMatcher::any(), access)
    }

    fn has_catch_all(&self) -> bool {
        self.rules.iter().any(|rule| rule.matcher.is_any())
    }

    /// Returns the access of the first rule matching the request.
    pub fn find_access(&self, method: &Method, path: &str) -> Option<&Access> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(method, path))
            .map(|rule| &rule.access)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Authorizer for RequestMatcherAuthorizer {
    fn authorize(&self, method: &Method, path: &str, user: Option<&User>) -> Result<(), AuthError> {
        let access = self.find_access(method, path).unwrap_or_else(|| {
            debug!("no authorization rule matches {} {}, denying", method, path);
            &UNMATCHED
        });

        if access.is_granted(user) {
            return Ok(());
        }

        match user {
            None => Err(AuthError::authentication_required(
                FULL_AUTHENTICATION_REQUIRED,
            )),
            Some(u) => {
                debug!(
                    "user {} denied {} {} (requires {:?})",
                    u.get_username(),
                    method,
                    path,
                    access
                );
                Err(AuthError::access_denied(ACCESS_DENIED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        User::new("u".to_string(), "{noop}p".to_string()).roles(&roles)
    }

    fn authorizer() -> RequestMatcherAuthorizer {
        RequestMatcherAuthorizer::new()
            .request_matchers(&["/auth/welcome"], Access::permit_all())
            .request_matchers(&["/auth/user"], Access::has_role("USER"))
            .request_matchers(&["/auth/admin"], Access::has_role("ADMIN"))
            .any_request(Access::authenticated())
    }

    fn decide(path: &str, user: Option<&User>) -> Result<(), AuthError> {
        authorizer().authorize(&Method::GET, path, user)
    }

    fn unauthorized() -> Result<(), AuthError> {
        Err(AuthError::authentication_required(FULL_AUTHENTICATION_REQUIRED))
    }

    fn forbidden() -> Result<(), AuthError> {
        Err(AuthError::access_denied(ACCESS_DENIED))
    }

    #[test]
    fn test_public_path_for_everyone() {
        assert_eq!(decide("/auth/welcome", None), Ok(()));
        assert_eq!(decide("/auth/welcome", Some(&user(&[]))), Ok(()));
        assert_eq!(decide("/auth/welcome", Some(&user(&["ADMIN"]))), Ok(()));
    }

    #[test]
    fn test_role_paths() {
        let plain = user(&["USER"]);
        let admin = user(&["ADMIN"]);

        assert_eq!(decide("/auth/user", None), unauthorized());
        assert_eq!(decide("/auth/user", Some(&plain)), Ok(()));
        assert_eq!(decide("/auth/user", Some(&admin)), forbidden());

        assert_eq!(decide("/auth/admin", None), unauthorized());
        assert_eq!(decide("/auth/admin", Some(&plain)), forbidden());
        assert_eq!(decide("/auth/admin", Some(&admin)), Ok(()));
    }

    #[test]
    fn test_catch_all_requires_any_identity() {
        assert_eq!(decide("/", None), unauthorized());
        assert_eq!(decide("/auth/other", None), unauthorized());
        assert_eq!(decide("/auth/other", Some(&user(&[]))), Ok(()));
    }

    #[test]
    fn test_first_match_wins() {
        let authorizer = RequestMatcherAuthorizer::new()
            .request_matchers(&["/auth/**"], Access::permit_all())
            .request_matchers(&["/auth/admin"], Access::has_role("ADMIN"));

        // the broader rule was registered first and shadows the specific one
        assert_eq!(authorizer.authorize(&Method::GET, "/auth/admin", None), Ok(()));
    }

    #[test]
    fn test_unmatched_request_is_denied() {
        let authorizer =
            RequestMatcherAuthorizer::new().request_matchers(&["/open"], Access::permit_all());

        assert_eq!(authorizer.authorize(&Method::GET, "/closed", None), unauthorized());
        assert_eq!(
            authorizer.authorize(&Method::GET, "/closed", Some(&user(&["ADMIN"]))),
            forbidden()
        );
    }

    #[test]
    fn test_deny_all() {
        let authorizer = RequestMatcherAuthorizer::new().any_request(Access::deny_all());
        assert_eq!(authorizer.authorize(&Method::GET, "/", None), unauthorized());
        assert_eq!(
            authorizer.authorize(&Method::GET, "/", Some(&user(&["ADMIN"]))),
            forbidden()
        );
    }

    #[test]
    fn test_authority_rule() {
        let authorizer = RequestMatcherAuthorizer::new()
            .request_matchers(&["/reports/**"], Access::has_any_authority(&["reports:read", "reports:all"]));
        let reader = User::new("r".into(), "x".into()).authorities(&["reports:read".into()]);

        assert_eq!(authorizer.authorize(&Method::GET, "/reports/1", Some(&reader)), Ok(()));
        assert_eq!(
            authorizer.authorize(&Method::GET, "/reports/1", Some(&user(&["ADMIN"]))),
            forbidden()
        );
    }

    #[test]
    fn test_method_specific_rule() {
        let authorizer = RequestMatcherAuthorizer::new()
            .add_matcher(RequestMatcher::ant("/items").method(Method::GET), Access::permit_all())
            .any_request(Access::has_role("ADMIN"));

        assert_eq!(authorizer.authorize(&Method::GET, "/items", None), Ok(()));
        assert_eq!(authorizer.authorize(&Method::POST, "/items", None), unauthorized());
    }

    #[test]
    fn test_multiple_patterns_share_access() {
        let authorizer = RequestMatcherAuthorizer::new()
            .request_matchers(&["/a", "/b"], Access::permit_all());
        assert_eq!(authorizer.len(), 2);
        assert_eq!(authorizer.find_access(&Method::GET, "/b"), Some(&Access::PermitAll));
    }

    #[test]
    fn test_decision_is_repeatable() {
        let authorizer = authorizer();
        let first = authorizer.authorize(&Method::GET, "/auth/admin", None);
        for _ in 0..5 {
            assert_eq!(authorizer.authorize(&Method::GET, "/auth/admin", None), first);
        }
    }
}
