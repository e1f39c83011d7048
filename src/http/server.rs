//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, locale redirects)
//! - Bind server to listener
//! - Forward pass-through requests to the page origin
//! - Graceful shutdown on signal or broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{uri::InvalidUri, Request},
    middleware::from_fn_with_state,
    response::Response,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::http::middleware::{locale_middleware, LocaleState};
use crate::http::response::PreferenceCookie;
use crate::http::upstream::Upstream;
use crate::lifecycle::signals::shutdown_signal;
use crate::locale::LocaleSetError;
use crate::routing::LocaleRouter;

/// Path of the liveness endpoint; lives under a skipped prefix.
pub const HEALTH_PATH: &str = "/_gate/health";

/// Errors raised while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid locale configuration: {0}")]
    Locales(#[from] LocaleSetError),

    #[error("invalid upstream origin: {0}")]
    Origin(#[from] InvalidUri),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Upstream,
}

/// HTTP server for the locale gate.
pub struct HttpServer {
    router: Router,
    config: GateConfig,
    locale_router: Arc<LocaleRouter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GateConfig) -> Result<Self, ServerError> {
        let locale_router = Arc::new(LocaleRouter::from_config(&config)?);
        let upstream = Upstream::from_config(&config.upstream)?;

        let locale_state = LocaleState {
            router: locale_router.clone(),
            cookie: PreferenceCookie::from_config(&config.locales),
        };

        let router = Self::build_router(&config, AppState { upstream }, locale_state);
        Ok(Self {
            router,
            config,
            locale_router,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, state: AppState, locale_state: LocaleState) -> Router {
        let common = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route(HEALTH_PATH, get(health_handler))
            .route("/{*path}", any(page_handler))
            .route("/", any(page_handler))
            .with_state(state)
            .layer(from_fn_with_state(locale_state, locale_middleware))
            .layer(common)
    }

    /// The axum router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The compiled locale router shared with the middleware.
    pub fn locale_router(&self) -> &Arc<LocaleRouter> {
        &self.locale_router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_locale = %self.locale_router.locales().default_locale(),
            upstream = ?self.config.upstream.origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Pages that passed the locale middleware go to the origin.
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.upstream.forward(request).await
}
