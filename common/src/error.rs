use std::path::PathBuf;

use thiserror::Error;

/// Reasons a scan request is rejected before any probing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid ip address: `{0}`")]
    InvalidAddress(String),
    #[error("Invalid ports: {begin}-{end}")]
    InvalidPortRange { begin: String, end: String },
    #[error("Can not parse request: `{0}` is not an integer")]
    MalformedInput(String),
}

/// Startup-time configuration failures.
///
/// All of them are fatal: the process must not start serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid parameters in the configuration file: {0}")]
    InvalidParameters(String),
}
