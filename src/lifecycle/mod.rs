//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Load config → Load denylist → Init metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs / signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger → stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal (except a missing denylist file)
//! - In-flight requests drain through axum's graceful shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
