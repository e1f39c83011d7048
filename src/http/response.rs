//! Redirect response construction.
//!
//! # Responsibilities
//! - Build 308 responses for locale redirects
//! - Format the locale preference `Set-Cookie` header
//! - Mark every redirect with the diagnostic header
//!
//! # Design Decisions
//! - 308 keeps the request method across the redirect
//! - Redirect bodies are empty
//! - The cookie is scoped to `/` so every page sees the same preference

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::LocalesConfig;
use crate::locale::Locale;
use crate::routing::Redirect;

/// Diagnostic header set on every redirect produced by the gate.
pub const X_REDIRECTED_BY: HeaderName = HeaderName::from_static("x-redirected-by");

/// Value of [`X_REDIRECTED_BY`].
pub const REDIRECTOR_NAME: &str = "locale-gate";

/// Attributes of the locale preference cookie.
#[derive(Debug, Clone)]
pub struct PreferenceCookie {
    pub name: String,
    pub max_age_secs: u64,
}

impl PreferenceCookie {
    pub fn from_config(config: &LocalesConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age_secs: config.cookie_max_age_secs,
        }
    }

    /// `Set-Cookie` value storing the locale.
    pub fn set_cookie_value(&self, locale: &Locale) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name,
            locale.code(),
            self.max_age_secs
        )
    }
}

/// Build the 308 response for a redirect decision.
pub fn redirect_response(redirect: &Redirect, cookie: &PreferenceCookie) -> Response {
    let location = match HeaderValue::from_str(&redirect.location) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(location = %redirect.location, error = %e, "Unrepresentable redirect location");
            return (StatusCode::BAD_REQUEST, "Invalid request path").into_response();
        }
    };

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::PERMANENT_REDIRECT;

    let headers = response.headers_mut();
    headers.insert(header::LOCATION, location);
    headers.insert(X_REDIRECTED_BY, HeaderValue::from_static(REDIRECTOR_NAME));

    if let Some(locale) = &redirect.set_cookie {
        match HeaderValue::from_str(&cookie.set_cookie_value(locale)) {
            Ok(v) => {
                headers.insert(header::SET_COOKIE, v);
            }
            Err(e) => {
                tracing::warn!(cookie = %cookie.name, error = %e, "Skipping unrepresentable cookie");
            }
        }
    }

    response
}
