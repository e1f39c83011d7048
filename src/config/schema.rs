//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locale gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Supported locales, default locale and the preference cookie.
    pub locales: LocalesConfig,

    /// Requests that bypass locale processing entirely.
    pub skip: SkipConfig,

    /// Origin that renders pages for pass-through requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Supported locale codes (two lower-case letters each).
    pub supported: Vec<String>,

    /// System default locale; must be one of `supported`.
    pub default: String,

    /// Name of the locale preference cookie.
    pub cookie_name: String,

    /// Max-Age of the preference cookie in seconds.
    pub cookie_max_age_secs: u64,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            supported: vec!["es".to_string(), "en".to_string()],
            default: "es".to_string(),
            cookie_name: "LOCALE_PREF".to_string(),
            cookie_max_age_secs: 60 * 60 * 24 * 365,
        }
    }
}

/// Skip predicate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Technical prefixes (framework assets, API namespace, platform internals).
    /// Matched on a segment boundary.
    pub technical_prefixes: Vec<String>,

    /// Image-generation endpoint names, matched against the last path segment.
    pub image_endpoints: Vec<String>,

    /// Well-known public files, matched exactly.
    pub public_files: Vec<String>,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            technical_prefixes: ["/_next", "/api", "/_vercel", "/_gate"]
                .map(String::from)
                .to_vec(),
            image_endpoints: ["opengraph-image", "twitter-image"]
                .map(String::from)
                .to_vec(),
            public_files: [
                "/robots.txt",
                "/sitemap.xml",
                "/favicon.ico",
                "/manifest.webmanifest",
                "/manifest.json",
                "/icon",
                "/apple-icon",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin address (e.g., "127.0.0.1:3000"). `None` disables forwarding.
    pub origin: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
