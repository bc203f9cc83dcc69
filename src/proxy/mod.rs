//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! classified + rewritten target URL
//!     → forward.rs (outbound build: header copy, User-Agent policy)
//!     → client.rs (shared pooled client, 30 s end-to-end timeout)
//!     → size check (Content-Length > 1 GiB → 307 redirect)
//!     → streaming relay back to the caller, chunk by chunk
//! ```
//!
//! # Design Decisions
//! - One shared client for all requests; its pool is the only shared
//!   mutable resource in the request path
//! - The body stream is consumed exactly once, never buffered whole,
//!   in either direction
//! - No retries: a transport failure is a 502, a mid-stream failure is
//!   logged and the connection terminates

pub mod client;
pub mod error;
pub mod forward;

pub use error::GatewayError;
pub use forward::Forwarder;
