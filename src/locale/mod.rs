//! Locale subsystem.
//!
//! # Data Flow
//! ```text
//! LocalesConfig (supported codes, default)
//!     → set.rs (validate, freeze as LocaleSet)
//!     → shared via Arc with routing
//!
//! Per request:
//!     first path segment / cookie / Accept-Language
//!     → tag.rs (classify language-tag shaped strings)
//!     → LocaleSet lookup
//!     → Locale (always a member of the set)
//! ```
//!
//! # Design Decisions
//! - A `Locale` can only be obtained from a `LocaleSet`, so an unsupported
//!   code can never reach a cookie or a path prefix
//! - Codes are stored lower-case (canonical case)
//! - The set is immutable after startup

pub mod set;
pub mod tag;

pub use set::{Locale, LocaleSet, LocaleSetError};
pub use tag::{accept_language_primary, LanguageTag};
