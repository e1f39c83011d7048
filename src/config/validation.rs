//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the locale set (codes, duplicates, default membership)
//! - Check skip rules are well-formed paths
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;

use crate::config::schema::GateConfig;
use crate::locale::{LocaleSet, LocaleSetError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("locales: {0}")]
    Locales(#[from] LocaleSetError),

    #[error("locales.cookie_name '{0}' is not a valid cookie name")]
    CookieName(String),

    #[error("skip.{field}: '{value}' must start with '/'")]
    NotAbsolute { field: &'static str, value: String },

    #[error("skip.technical_prefixes: '{0}' must not end with '/'")]
    TrailingSlash(String),

    #[error("skip.image_endpoints: '{0}' must be a single path segment")]
    ImageEndpoint(String),

    #[error("skip.{field}: '{value}' would swallow locale path '/{locale}'")]
    ShadowsLocale {
        field: &'static str,
        value: String,
        locale: String,
    },

    #[error("{field}: '{value}' is not a socket address")]
    Address { field: &'static str, value: String },

    #[error("upstream.origin: '{0}' is not a host[:port] authority")]
    Origin(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let locales = match LocaleSet::new(&config.locales.supported, &config.locales.default) {
        Ok(set) => Some(set),
        Err(e) => {
            errors.push(ValidationError::Locales(e));
            None
        }
    };

    if !is_cookie_name(&config.locales.cookie_name) {
        errors.push(ValidationError::CookieName(config.locales.cookie_name.clone()));
    }

    for prefix in &config.skip.technical_prefixes {
        if !prefix.starts_with('/') || prefix.len() < 2 {
            errors.push(ValidationError::NotAbsolute {
                field: "technical_prefixes",
                value: prefix.clone(),
            });
        } else if prefix.ends_with('/') {
            errors.push(ValidationError::TrailingSlash(prefix.clone()));
        }
    }

    for file in &config.skip.public_files {
        if !file.starts_with('/') {
            errors.push(ValidationError::NotAbsolute {
                field: "public_files",
                value: file.clone(),
            });
        }
    }

    for endpoint in &config.skip.image_endpoints {
        if endpoint.is_empty() || endpoint.contains('/') {
            errors.push(ValidationError::ImageEndpoint(endpoint.clone()));
        }
    }

    // A skip rule that covers a locale home would leave that locale unreachable
    // through the gate while redirects keep pointing at it.
    if let Some(locales) = &locales {
        for locale in locales.iter() {
            let home = locale.home_path();
            for prefix in &config.skip.technical_prefixes {
                if prefix.eq_ignore_ascii_case(&home) {
                    errors.push(ValidationError::ShadowsLocale {
                        field: "technical_prefixes",
                        value: prefix.clone(),
                        locale: locale.code().to_string(),
                    });
                }
            }
            for endpoint in &config.skip.image_endpoints {
                if endpoint == locale.code() {
                    errors.push(ValidationError::ShadowsLocale {
                        field: "image_endpoints",
                        value: endpoint.clone(),
                        locale: locale.code().to_string(),
                    });
                }
            }
            for file in &config.skip.public_files {
                if file == &home {
                    errors.push(ValidationError::ShadowsLocale {
                        field: "public_files",
                        value: file.clone(),
                        locale: locale.code().to_string(),
                    });
                }
            }
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if let Some(origin) = &config.upstream.origin {
        if Authority::from_str(origin).is_err() {
            errors.push(ValidationError::Origin(origin.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// RFC 6265 token characters.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GateConfig::default();
        config.locales.default = "fr".into();
        config.locales.cookie_name = "bad name".into();
        config.skip.technical_prefixes.push("api2".into());
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Locales(LocaleSetError::UnknownDefault(
            "fr".into()
        ))));
        assert!(errors.contains(&ValidationError::CookieName("bad name".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_skip_rule_shadowing_locale() {
        let mut config = GateConfig::default();
        config.skip.technical_prefixes.push("/en".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ShadowsLocale {
                field: "technical_prefixes",
                value: "/en".into(),
                locale: "en".into(),
            }]
        );
    }

    #[test]
    fn test_rejects_image_endpoint_named_like_locale() {
        let mut config = GateConfig::default();
        config.skip.image_endpoints.push("en".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ShadowsLocale {
                field: "image_endpoints",
                value: "en".into(),
                locale: "en".into(),
            }]
        );
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "localhost".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_rejects_bad_origin() {
        let mut config = GateConfig::default();
        config.upstream.origin = Some("http://site:3000/path".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Origin("http://site:3000/path".into())]
        );
    }

    #[test]
    fn test_rejects_malformed_image_endpoint() {
        let mut config = GateConfig::default();
        config.skip.image_endpoints.push("/og/image".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ImageEndpoint("/og/image".into())]
        );
    }
}
