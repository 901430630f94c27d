//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::oper::OperBlock;
use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("usage: relayd <port> <password> [config.toml]")]
    Usage,
    #[error("invalid port number: {0:?}")]
    InvalidPort(String),
    #[error("port out of range (0-65535): {0}")]
    PortOutOfRange(String),
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Connection and framing limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Operator blocks.
    #[serde(default)]
    pub oper: Vec<OperBlock>,
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the reply prefix before registration.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Shared connection password checked by PASS.
    #[serde(default)]
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            password: String::new(),
        }
    }
}

fn default_server_name() -> String {
    "relayd.local".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the configuration from `relayd <port> <password> [config.toml]`.
    ///
    /// `args` excludes the program name. The port and password always win
    /// over the file.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let (port, password, path) = match args {
            [port, password] => (port, password, None),
            [port, password, path] => (port, password, Some(path)),
            _ => return Err(ConfigError::Usage),
        };

        let port = parse_port(port)?;
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.listen.port = port;
        config.server.password = password.clone();

        super::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Parse a decimal TCP port, distinguishing garbage from out-of-range numbers.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidPort(raw.to_string()));
    }
    raw.parse::<u16>()
        .map_err(|_| ConfigError::PortOutOfRange(raw.to_string()))
}
