//! Routing decisions produced by the locale router.

use serde::Serialize;

use crate::locale::Locale;

/// Which rule produced a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// `/` sent to the preferred locale's home.
    Root,
    /// Supported locale segment in the wrong case.
    CaseNormalized,
    /// Language tag folded onto its base or the default locale.
    TagNormalized,
    /// No locale segment; sent to the preferred locale's home.
    MissingLocale,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::Root => "root",
            RedirectReason::CaseNormalized => "case_normalized",
            RedirectReason::TagNormalized => "tag_normalized",
            RedirectReason::MissingLocale => "missing_locale",
        }
    }
}

/// A 308 redirect issued by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Target path including the preserved query string.
    pub location: String,

    /// Locale to store in the preference cookie, if any.
    pub set_cookie: Option<Locale>,

    pub reason: RedirectReason,
}

impl Redirect {
    /// Path component of the location.
    pub fn path(&self) -> &str {
        match self.location.split_once('?') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    /// Query component of the location, without the `?`.
    pub fn query(&self) -> Option<&str> {
        self.location.split_once('?').map(|(_, q)| q)
    }
}

/// Outcome of deciding one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// Bypasses locale processing (assets, API, public files).
    Skip,
    /// Already carries a canonical supported locale.
    Continue { locale: Locale },
    Redirect(Redirect),
}

impl Decision {
    /// True when the request goes on to the page renderer unchanged.
    pub fn is_pass_through(&self) -> bool {
        !matches!(self, Decision::Redirect(_))
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Decision::Redirect(r) => Some(r),
            _ => None,
        }
    }

    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Skip => "skip",
            Decision::Continue { .. } => "continue",
            Decision::Redirect(r) => r.reason.as_str(),
        }
    }
}
