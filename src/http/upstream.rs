//! Forwarding of pass-through requests to the page origin.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the configured origin
//! - Stream the request and response bodies through unchanged
//! - Map origin failures to 502 and a missing origin to 404
//!
//! # Design Decisions
//! - No retries: page renders are not assumed idempotent
//! - Host header is preserved so the origin sees the public host

use std::str::FromStr;
use std::time::Instant;

use axum::{
    body::Body,
    http::{
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Client for the page origin.
#[derive(Clone)]
pub struct Upstream {
    origin: Option<Authority>,
    client: Client<HttpConnector, Body>,
}

impl Upstream {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, InvalidUri> {
        let origin = config
            .origin
            .as_deref()
            .map(Authority::from_str)
            .transpose()?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { origin, client })
    }

    pub fn origin(&self) -> Option<&Authority> {
        self.origin.as_ref()
    }

    /// Forward a request to the origin and return its response.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let start_time = Instant::now();
        let request_id = request.request_id().to_string();
        let path = request.uri().path().to_string();

        let Some(origin) = &self.origin else {
            tracing::warn!(request_id = %request_id, path = %path, "No upstream configured");
            return (StatusCode::NOT_FOUND, "No upstream configured").into_response();
        };

        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(origin.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = match Uri::from_parts(uri_parts) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Cannot rewrite request URI");
                return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
            }
        };

        tracing::debug!(
            request_id = %request_id,
            path = %path,
            origin = %origin,
            "Forwarding request"
        );

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                metrics::record_upstream(response.status().as_u16(), start_time);
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, origin = %origin, error = %e, "Upstream error");
                metrics::record_upstream(502, start_time);
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}
