//! Request inspection helpers.
//!
//! # Responsibilities
//! - Read the request ID set by the request-id layer
//! - Extract the locale preference cookie from `Cookie` headers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Malformed cookie headers are ignored, never rejected

use axum::http::{header, HeaderMap, HeaderName, Request};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Access to the request ID on a request.
pub trait RequestIdExt {
    /// The request ID, or `"unknown"` when none was set.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Value of the named cookie across all `Cookie` headers.
///
/// The first occurrence wins, as browsers send the most specific cookie first.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; LOCALE_PREF=en; other=1"),
        );
        assert_eq!(cookie_value(&headers, "LOCALE_PREF"), Some("en"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_multiple_headers_and_quotes() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("LOCALE_PREF=\"es\""));
        assert_eq!(cookie_value(&headers, "LOCALE_PREF"), Some("es"));
    }

    #[test]
    fn test_cookie_name_is_exact() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("XLOCALE_PREF=en; garbage"));
        assert_eq!(cookie_value(&headers, "LOCALE_PREF"), None);
    }

    #[test]
    fn test_request_id() {
        let req = Request::builder()
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(req.request_id(), "abc-123");

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(req.request_id(), "unknown");
    }
}
