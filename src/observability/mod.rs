//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gateway handler + forwarder produce:
//!     → tracing events (structured log lines, request-id correlated)
//!     → metrics.rs (counters, histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric updates are atomic increments, cheap enough for the hot path
//! - The exporter is optional; recording without it installed is a no-op

pub mod metrics;
