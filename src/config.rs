//! Configuration management for the annotation metadata service

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_body_bytes: 2 * 1024 * 1024,
            },
        }
    }
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Config::default().server;

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.host),
                port: parse_var("SERVER_PORT", defaults.port),
                max_body_bytes: parse_var("MAX_BODY_BYTES", defaults.max_body_bytes),
            },
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_var_falls_back() {
        env::set_var("ANNOTATION_METADATA_TEST_PORT", "not-a-port");
        assert_eq!(parse_var("ANNOTATION_METADATA_TEST_PORT", 3000u16), 3000);

        env::set_var("ANNOTATION_METADATA_TEST_PORT", "8080");
        assert_eq!(parse_var("ANNOTATION_METADATA_TEST_PORT", 3000u16), 8080);

        assert_eq!(parse_var("ANNOTATION_METADATA_TEST_UNSET", 7usize), 7);
    }
}
