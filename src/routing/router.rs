//! The edge locale router.
//!
//! # Responsibilities
//! - Hold the compiled skip predicate and the locale set
//! - Decide every request: skip, continue, or redirect
//! - Resolve the preferred locale from the preference cookie
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Total function: every path yields exactly one decision
//! - Rules are evaluated in a fixed order, first match wins
//! - No Accept-Language negotiation, so decisions depend only on path and cookie

use crate::config::GateConfig;
use crate::locale::{Locale, LocaleSet, LocaleSetError, LanguageTag};
use crate::routing::decision::{Decision, Redirect, RedirectReason};
use crate::routing::matcher::SkipPredicate;

/// Decides locale handling for inbound requests.
#[derive(Debug)]
pub struct LocaleRouter {
    locales: LocaleSet,
    skip: SkipPredicate,
}

impl LocaleRouter {
    pub fn new(locales: LocaleSet, skip: SkipPredicate) -> Self {
        Self { locales, skip }
    }

    /// Compile the router from a validated configuration.
    pub fn from_config(config: &GateConfig) -> Result<Self, LocaleSetError> {
        let locales = LocaleSet::new(&config.locales.supported, &config.locales.default)?;
        let skip = SkipPredicate::from_config(&config.skip);
        Ok(Self::new(locales, skip))
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn skip_predicate(&self) -> &SkipPredicate {
        &self.skip
    }

    /// Locale named by the preference cookie, or the default.
    pub fn preferred_locale(&self, cookie: Option<&str>) -> &Locale {
        cookie
            .and_then(|value| self.locales.get_ignore_case(value.trim()))
            .unwrap_or_else(|| self.locales.default_locale())
    }

    /// Decide what to do with a request.
    ///
    /// `query` is the raw query string without the leading `?`; `cookie` is
    /// the preference cookie value if the request carried one.
    pub fn decide(&self, path: &str, query: Option<&str>, cookie: Option<&str>) -> Decision {
        if self.skip.should_skip(path) {
            return Decision::Skip;
        }

        if path == "/" {
            let locale = self.preferred_locale(cookie);
            return Decision::Redirect(Redirect {
                location: with_query(locale.home_path(), query),
                set_cookie: Some(locale.clone()),
                reason: RedirectReason::Root,
            });
        }

        let (segment, rest) = split_first_segment(path);

        if let Some(locale) = self.locales.get(segment) {
            return Decision::Continue {
                locale: locale.clone(),
            };
        }

        if let Some(locale) = self.locales.get_ignore_case(segment) {
            return Decision::Redirect(Redirect {
                location: with_query(format!("/{}{}", locale.code(), rest), query),
                set_cookie: None,
                reason: RedirectReason::CaseNormalized,
            });
        }

        if let Some(tag) = LanguageTag::parse(segment) {
            let locale = self
                .locales
                .get(&tag.base())
                .unwrap_or_else(|| self.locales.default_locale());
            return Decision::Redirect(Redirect {
                location: with_query(format!("/{}{}", locale.code(), rest), query),
                set_cookie: Some(locale.clone()),
                reason: RedirectReason::TagNormalized,
            });
        }

        let locale = self.preferred_locale(cookie);
        Decision::Redirect(Redirect {
            location: with_query(locale.home_path(), query),
            set_cookie: Some(locale.clone()),
            reason: RedirectReason::MissingLocale,
        })
    }
}

/// Split `/seg/rest...` into `("seg", "/rest...")`.
fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(i) => (&trimmed[..i], &trimmed[i..]),
        None => (trimmed, ""),
    }
}

fn with_query(mut location: String, query: Option<&str>) -> String {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }
    location
}
