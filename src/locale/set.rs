//! Supported locale set.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// A supported locale.
///
/// Only obtainable through [`LocaleSet`], which guarantees the code is a
/// configured, lower-case, two-letter language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    code: Arc<str>,
}

impl Locale {
    /// The canonical (lower-case) code, e.g. `"es"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Home path for this locale, e.g. `"/es"`.
    pub fn home_path(&self) -> String {
        format!("/{}", self.code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}

/// Errors raised while building a [`LocaleSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleSetError {
    #[error("at least one supported locale is required")]
    Empty,

    #[error("locale code '{0}' must be two lower-case ASCII letters")]
    InvalidCode(String),

    #[error("locale code '{0}' is listed more than once")]
    Duplicate(String),

    #[error("default locale '{0}' is not in the supported set")]
    UnknownDefault(String),
}

/// The fixed set of supported locales plus the system default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default: usize,
}

impl LocaleSet {
    /// Build a set from configured codes.
    pub fn new<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self, LocaleSetError> {
        if codes.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        let mut locales: Vec<Locale> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            if !is_locale_code(code) {
                return Err(LocaleSetError::InvalidCode(code.to_string()));
            }
            if locales.iter().any(|l| l.code() == code) {
                return Err(LocaleSetError::Duplicate(code.to_string()));
            }
            locales.push(Locale { code: Arc::from(code) });
        }

        let default = locales
            .iter()
            .position(|l| l.code() == default)
            .ok_or_else(|| LocaleSetError::UnknownDefault(default.to_string()))?;

        Ok(Self { locales, default })
    }

    /// Exact (canonical case) lookup.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code() == code)
    }

    /// Case-insensitive lookup.
    pub fn get_ignore_case(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code().eq_ignore_ascii_case(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// The system default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default]
    }

    /// All supported locales in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    /// Supported locales other than the default, in configured order.
    pub fn non_default(&self) -> impl Iterator<Item = &Locale> {
        let default = self.default;
        self.locales
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != default)
            .map(|(_, l)| l)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

fn is_locale_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase())
}
