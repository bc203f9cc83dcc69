//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_operational_profile() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.upstream.pool_idle_timeout_secs, 90);
        assert_eq!(config.upstream.pool_max_idle_per_host, 10);
        assert_eq!(config.denylist.path, "blacklist.txt");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:9999\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [[[").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
