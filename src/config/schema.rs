//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream HTTP client settings.
    pub upstream: UpstreamConfig,

    /// Denylist settings.
    pub denylist: DenylistConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream HTTP client configuration.
///
/// One shared client serves every in-flight request; these knobs size its
/// connection pool and bound the full request lifecycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// End-to-end request timeout in seconds (connect + headers + body).
    pub timeout_secs: u64,

    /// Idle pooled connections expire after this many seconds.
    pub pool_idle_timeout_secs: u64,

    /// Maximum idle connections kept per upstream host.
    pub pool_max_idle_per_host: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 10,
        }
    }
}

/// Denylist configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DenylistConfig {
    /// Path to the line-oriented denylist file.
    pub path: String,
}

impl Default for DenylistConfig {
    fn default() -> Self {
        Self {
            path: "blacklist.txt".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
