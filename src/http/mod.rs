//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → middleware/locale.rs (decide: skip, continue, redirect)
//!         → response.rs (308 + Location + Set-Cookie)
//!     → upstream.rs (forward pass-through requests to the origin)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::{cookie_value, RequestIdExt, X_REQUEST_ID};
pub use response::{redirect_response, PreferenceCookie, REDIRECTOR_NAME, X_REDIRECTED_BY};
pub use server::{HttpServer, ServerError, HEALTH_PATH};
pub use upstream::Upstream;
