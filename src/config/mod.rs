//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ProxyConfig (immutable)
//!     → shared by value to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the proxy runs with no config file at all
//! - Defaults mirror the service's documented operational profile
//!   (loopback listener, 30 s upstream timeout, 90 s idle pool expiry)

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ProxyConfig;
pub use schema::{DenylistConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
