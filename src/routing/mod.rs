//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query, preference cookie)
//!     → matcher.rs (skip predicate)
//!     → router.rs (locale rules, first match wins)
//!     → decision.rs: Skip | Continue | Redirect
//!
//! Router Compilation (at startup):
//!     GateConfig
//!     → LocaleSet + SkipPredicate
//!     → Freeze as immutable LocaleRouter
//!     → rules.rs derives the static RuleTable from the same LocaleSet
//! ```
//!
//! # Design Decisions
//! - Router compiled at startup, immutable at runtime
//! - No regex in hot path (prefix and suffix checks only)
//! - Deterministic: same path and cookie always produce the same decision
//! - The fallback rule table is data derived from the router's locale set,
//!   never configured separately

pub mod decision;
pub mod matcher;
pub mod router;
pub mod rules;

pub use decision::{Decision, Redirect, RedirectReason};
pub use matcher::{Matcher, SkipPredicate};
pub use router::LocaleRouter;
pub use rules::{verify_consistency, ConsistencyError, RuleInput, RuleTable};
