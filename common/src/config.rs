//! Process-wide scan settings.
//!
//! Loaded once at startup from a TOML file and treated as read-only for the
//! lifetime of the process. The file uses a single `[settings]` table:
//!
//! ```toml
//! [settings]
//! port = 9090
//! timeout = 1
//! amount_threads_for_user = 5
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::network::target::is_valid_port;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const DEFAULT_CONFIG: &str = "[settings]
port = 9090
timeout = 1
amount_threads_for_user = 5
";

const DEFAULT_PORT: u16 = 9090;
const DEFAULT_BATCH_SIZE: usize = 5;
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Listen port of the HTTP service.
    pub port: u16,
    /// Maximum number of probes in flight at any instant.
    pub batch_size: usize,
    /// Upper bound for a single connect attempt.
    pub probe_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            batch_size: DEFAULT_BATCH_SIZE,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    settings: RawSettings,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    port: i64,
    timeout: Seconds,
    amount_threads_for_user: i64,
}

/// `timeout = 1` and `timeout = 0.5` are both accepted.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Whole(i64),
    Fractional(f64),
}

impl Seconds {
    fn as_f64(self) -> f64 {
        match self {
            Seconds::Whole(secs) => secs as f64,
            Seconds::Fractional(secs) => secs,
        }
    }
}

impl ScanConfig {
    /// Reads the config file at `path`.
    ///
    /// A missing file is not an error: the defaults are written to `path`
    /// and returned. A file that exists but cannot be parsed or holds invalid
    /// values is rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            materialize_default(path);
            return Ok(Self::default());
        }

        let content: String = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content)?;
        debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML config content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        Self::from_raw(raw.settings)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        if !is_valid_port(raw.port) {
            return Err(ConfigError::InvalidParameters(format!(
                "port `{}` is not a valid port",
                raw.port
            )));
        }

        if raw.amount_threads_for_user < 1 {
            return Err(ConfigError::InvalidParameters(format!(
                "amount_threads_for_user `{}` must be at least 1",
                raw.amount_threads_for_user
            )));
        }

        let secs: f64 = raw.timeout.as_f64();
        let probe_timeout = Duration::try_from_secs_f64(secs).map_err(|_| {
            ConfigError::InvalidParameters(format!(
                "timeout `{secs}` must be a finite, non-negative number of seconds"
            ))
        })?;

        let batch_size = usize::try_from(raw.amount_threads_for_user).map_err(|_| {
            ConfigError::InvalidParameters(format!(
                "amount_threads_for_user `{}` is too large",
                raw.amount_threads_for_user
            ))
        })?;

        Ok(Self {
            port: raw.port as u16,
            batch_size,
            probe_timeout,
        })
    }
}

fn materialize_default(path: &Path) {
    match fs::write(path, DEFAULT_CONFIG) {
        Ok(()) => info!("No config found, created default at {}", path.display()),
        Err(e) => warn!(
            "No config found and the default could not be written to {}: {e}",
            path.display()
        ),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
