//! Request classification subsystem.
//!
//! # Data Flow
//! ```text
//! raw inbound path (leading / stripped)
//!     → classifier.rs (scheme-strip, re-prefix https://)
//!     → pattern.rs (ordered URL families, first match wins)
//!     → Classification (Api | Resource | Unmatched)
//! ```
//!
//! # Design Decisions
//! - Matching is hand-rolled segment parsing, no regex in the hot path
//! - The family list is a fixed ordered array; priority is explicit
//! - Classification is a pure function of the path: no I/O, deterministic,
//!   and idempotent over its own normalized output

pub mod classifier;
pub mod pattern;

pub use classifier::{classify, Classification, ClassifyError};
pub use pattern::UrlFamily;
