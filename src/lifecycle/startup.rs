//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize metrics when enabled
//! - Compile the locale router and derive the fallback rule table
//! - Verify the two agree before taking traffic
//! - Bind the listener and run the server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::GateConfig;
use crate::http::{HttpServer, ServerError};
use crate::observability::metrics;
use crate::routing::{verify_consistency, ConsistencyError, RuleTable};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("rule table disagrees with locale router: {0:?}")]
    Consistency(Vec<ConsistencyError>),

    #[error("metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid address '{0}'")]
    Address(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build everything, bind, and serve until shutdown.
pub async fn start(
    config: GateConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let cookie_name = config.locales.cookie_name.clone();
    let server = HttpServer::new(config)?;

    let table = RuleTable::from_locales(server.locale_router().locales(), &cookie_name);
    verify_consistency(server.locale_router(), &table).map_err(StartupError::Consistency)?;
    tracing::info!(rules = table.rules().len(), "Fallback rule table verified");

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown).await?;
    Ok(())
}
