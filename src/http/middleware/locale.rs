//! Locale redirect middleware.
//! Runs the locale router in front of every page request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::http::request::{cookie_value, RequestIdExt};
use crate::http::response::{redirect_response, PreferenceCookie};
use crate::observability::metrics;
use crate::routing::{Decision, LocaleRouter};

/// Header forwarded upstream with the resolved locale.
pub const X_LOCALE: HeaderName = HeaderName::from_static("x-locale");

/// State shared by the locale middleware.
#[derive(Clone)]
pub struct LocaleState {
    pub router: Arc<LocaleRouter>,
    pub cookie: PreferenceCookie,
}

pub async fn locale_middleware(
    State(state): State<LocaleState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let decision = {
        let cookie = cookie_value(req.headers(), &state.cookie.name);
        state
            .router
            .decide(req.uri().path(), req.uri().query(), cookie)
    };

    metrics::record_decision(&decision);

    match decision {
        Decision::Skip => {
            req.headers_mut().remove(X_LOCALE);
            next.run(req).await
        }
        Decision::Continue { locale } => {
            if let Ok(value) = HeaderValue::from_str(locale.code()) {
                req.headers_mut().insert(X_LOCALE, value);
            }
            req.extensions_mut().insert(locale);
            next.run(req).await
        }
        Decision::Redirect(redirect) => {
            tracing::debug!(
                request_id = %req.request_id(),
                path = %req.uri().path(),
                location = %redirect.location,
                rule = redirect.reason.as_str(),
                cookie = ?redirect.set_cookie.as_ref().map(|l| l.code()),
                "Locale redirect"
            );
            redirect_response(&redirect, &state.cookie)
        }
    }
}
