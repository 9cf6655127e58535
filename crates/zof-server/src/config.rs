//! Server configuration.

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Wall-clock limit for one solve, in milliseconds
    #[serde(default = "default_solve_timeout_ms")]
    pub solve_timeout_ms: u64,

    /// Upper bound applied to every requested iteration budget
    #[serde(default = "default_max_iterations_limit")]
    pub max_iterations_limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_solve_timeout_ms() -> u64 {
    5_000
}

fn default_max_iterations_limit() -> u32 {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            solve_timeout_ms: default_solve_timeout_ms(),
            max_iterations_limit: default_max_iterations_limit(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 3000\nmax_iterations_limit = 500\n").unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.max_iterations_limit, 500);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.solve_timeout_ms, 5_000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
