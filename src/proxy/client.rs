//! Shared upstream HTTP client.

use std::time::Duration;

use crate::config::UpstreamConfig;

/// Build the shared connection-pooled client.
///
/// The timeout is end-to-end: it covers connect, headers, and the full body
/// transfer of a single upstream exchange. Keep-alive and transparent gzip
/// decompression stay enabled, and the default redirect policy (up to 10
/// hops) is what resolves the final upstream URL reported for the
/// size-limit redirect.
pub fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .gzip(true)
        .build()
}
