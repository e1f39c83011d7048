//! Skip predicate matching.
//!
//! # Responsibilities
//! - Match technical path prefixes on a segment boundary
//! - Match well-known public files exactly
//! - Match image-generation endpoints by last segment
//! - Match any path ending in a file extension
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

use crate::config::SkipConfig;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix on a segment boundary.
///
/// `/api` matches `/api` and `/api/users`, not `/apiary`.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Matches one of a fixed list of paths exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    paths: Vec<String>,
}

impl ExactPathMatcher {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Matches paths ending in `.` followed by one or more ASCII alphanumerics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtensionMatcher;

impl Matcher for FileExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.rsplit_once('.') {
            Some((_, ext)) => !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric()),
            None => false,
        }
    }
}

/// Matches image-generation endpoints such as `/es/opengraph-image`.
///
/// The last path segment must equal the endpoint name or start with
/// `<name>-` (hashed variants).
#[derive(Debug, Clone)]
pub struct ImageEndpointMatcher {
    names: Vec<String>,
}

impl ImageEndpointMatcher {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl Matcher for ImageEndpointMatcher {
    fn matches(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or(path);
        self.names.iter().any(|name| match last.strip_prefix(name.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('-'),
            None => false,
        })
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

/// The compiled skip predicate.
#[derive(Debug)]
pub struct SkipPredicate {
    inner: AnyMatcher,
}

impl SkipPredicate {
    /// Compile the predicate from configuration.
    pub fn from_config(config: &SkipConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = config
            .technical_prefixes
            .iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p.as_str())) as Box<dyn Matcher>)
            .collect();

        matchers.push(Box::new(ImageEndpointMatcher::new(config.image_endpoints.clone())));
        matchers.push(Box::new(FileExtensionMatcher));
        matchers.push(Box::new(ExactPathMatcher::new(config.public_files.clone())));

        Self {
            inner: AnyMatcher::new(matchers),
        }
    }

    /// Returns true if the path bypasses locale processing.
    pub fn should_skip(&self, path: &str) -> bool {
        self.inner.matches(path)
    }
}
