//! Process configuration loaded from environment variables with sensible
//! defaults.

use std::{
    net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr},
    num::ParseIntError,
    path::Path,
};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,todo_server=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind address (`HOST`). Must be a literal IP such as `127.0.0.1` or
    /// `::`; host names like `localhost` are not resolved.
    pub host: IpAddr,
    /// Bind port (`PORT`).
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive (`RUST_LOG`).
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid HOST {value:?}, expected an IP address such as 127.0.0.1: {source}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = var("HOST") {
            config.host = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidHost { value, source })?;
        }
        if let Some(value) = var("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?;
        }
        if let Some(value) = var("RUST_LOG") {
            config.log_filter = value;
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load variables from the `.env` file at `path`. A missing file is not an
/// error; a file that exists but does not parse is.
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Err(err) if err.not_found() => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn reads_host_port_and_filter() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));
    }

    #[test]
    fn invalid_host_is_an_error() {
        let err = Config::from_lookup(lookup(&[("HOST", "localhost:1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }

    #[test]
    fn host_name_is_rejected_with_a_hint() {
        let err = Config::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("expected an IP address"), "{err}");
    }

    #[test]
    fn missing_dotenv_file_is_fine() {
        let path = std::env::temp_dir().join(format!("todo-server-{}.env", uuid::Uuid::new_v4()));
        assert!(load_dotenv(&path).is_ok());
    }

    #[test]
    fn malformed_dotenv_file_is_reported() {
        let path = std::env::temp_dir().join(format!("todo-server-{}.env", uuid::Uuid::new_v4()));
        std::fs::write(&path, "TODO_SERVER_BROKEN='unterminated\n").unwrap();
        let result = load_dotenv(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
