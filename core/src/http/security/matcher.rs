//! Request matchers used by the authorization rules.
//!
//! # Spring Security Equivalent
//! `AntPathRequestMatcher`, `RegexRequestMatcher` and `AnyRequestMatcher`
//!
//! # Ant Pattern Syntax
//!
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//! - `{name}` matches exactly one path segment
//!
//! Empty segments are ignored, so `/auth/user` and `/auth/user/` match the
//! same patterns.

use std::fmt;

use actix_web::http::Method;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*` or `{name}`
    AnySegment,
    /// `**`
    AnyDepth,
    /// A segment containing `*` or `?`
    Wildcard(Vec<char>),
}

/// An Ant-style path pattern.
///
/// # Example
/// ```
/// use demo_rest_security::http::security::matcher::AntPattern;
///
/// let pattern = AntPattern::new("/auth/**");
/// assert!(pattern.matches("/auth/admin"));
/// assert!(!pattern.matches("/health"));
/// ```
#[derive(Debug, Clone)]
pub struct AntPattern {
    pattern: String,
    segments: Vec<Segment>,
}

impl AntPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|part| match part {
                "**" => Segment::AnyDepth,
                "*" => Segment::AnySegment,
                p if p.starts_with('{') && p.ends_with('}') => Segment::AnySegment,
                p if p.contains(['*', '?']) => Segment::Wildcard(p.chars().collect()),
                p => Segment::Literal(p.to_string()),
            })
            .collect();

        AntPattern {
            pattern: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        let path: Vec<&str> = split_path(path).collect();
        match_segments(&self.segments, &path)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if *first == Segment::AnyDepth {
        return (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]));
    }

    let Some((segment, remaining)) = path.split_first() else {
        return false;
    };
    let head_matches = match first {
        Segment::Literal(literal) => literal == segment,
        Segment::Wildcard(chars) => {
            let text: Vec<char> = segment.chars().collect();
            match_wildcard(chars, &text)
        }
        Segment::AnySegment | Segment::AnyDepth => true,
    };
    head_matches && match_segments(rest, remaining)
}

fn match_wildcard(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| match_wildcard(rest, &text[skip..])),
        Some(('?', rest)) => !text.is_empty() && match_wildcard(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && match_wildcard(rest, &text[1..]),
    }
}

#[derive(Debug, Clone)]
enum PathMatcher {
    Any,
    Ant(AntPattern),
    Regex(Regex),
}

/// Matches a request by path and, optionally, by method.
///
/// # Example
/// ```
/// use actix_web::http::Method;
/// use demo_rest_security::http::security::RequestMatcher;
///
/// let matcher = RequestMatcher::ant("/auth/admin").method(Method::GET);
/// assert!(matcher.matches(&Method::GET, "/auth/admin"));
/// assert!(!matcher.matches(&Method::POST, "/auth/admin"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestMatcher {
    path: PathMatcher,
    method: Option<Method>,
}

impl RequestMatcher {
    /// Matches every request.
    pub fn any() -> Self {
        RequestMatcher {
            path: PathMatcher::Any,
            method: None,
        }
    }

    pub fn ant(pattern: &str) -> Self {
        RequestMatcher {
            path: PathMatcher::Ant(AntPattern::new(pattern)),
            method: None,
        }
    }

    /// Matches paths against a regular expression.
    ///
    /// The expression is not anchored implicitly; use `^...$` for a full match.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(RequestMatcher {
            path: PathMatcher::Regex(Regex::new(pattern)?),
            method: None,
        })
    }

    /// Restricts the matcher to one HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// True for the unrestricted catch-all matcher.
    pub fn is_any(&self) -> bool {
        matches!(self.path, PathMatcher::Any) && self.method.is_none()
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        if self.method.as_ref().is_some_and(|m| m != method) {
            return false;
        }
        match &self.path {
            PathMatcher::Any => true,
            PathMatcher::Ant(pattern) => pattern.matches(path),
            PathMatcher::Regex(regex) => regex.is_match(path),
        }
    }
}

impl fmt::Display for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(method) = &self.method {
            write!(f, "{} ", method)?;
        }
        match &self.path {
            PathMatcher::Any => write!(f, "any request"),
            PathMatcher::Ant(pattern) => write!(f, "{}", pattern.as_str()),
            PathMatcher::Regex(regex) => write!(f, "regex {}", regex.as_str()),
        }
    }
}
