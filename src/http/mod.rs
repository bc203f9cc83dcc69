//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, liveness + health routes)
//!     → request.rs (request ID generation)
//!     → gateway handler (classify → denylist → rewrite → forward)
//!     → streamed response to client
//! ```

pub mod request;
pub mod server;

pub use request::{ProxyRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
