//! Locale gate library: edge locale routing in front of a page origin.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod routing;

pub use config::schema::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Decision, LocaleRouter, RuleTable};
