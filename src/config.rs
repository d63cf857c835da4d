//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `STARLINK_DASH_*` environment variables.
//!
//! ```toml
//! tool_dir = "/opt/starlink-grpc-tools"
//! interpreter = "python3"
//! script = "dish_grpc_text.py"
//! log_dir = "logs"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "STARLINK_DASH";

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "starlink-dash.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory containing the diagnostics tool; the tool runs from here.
    pub tool_dir: PathBuf,
    /// Program used to launch the diagnostics script.
    pub interpreter: String,
    /// Diagnostics script, relative to `tool_dir`.
    pub script: String,
    /// Directory for `errors.txt` and `dashboard.txt`.
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool_dir: PathBuf::from("starlink-grpc-tools"),
            interpreter: "python3".to_string(),
            script: "dish_grpc_text.py".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Settings {
    /// Load settings, treating a missing config file as empty.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Path of the error/debug log.
    pub fn errors_log(&self) -> PathBuf {
        self.log_dir.join("errors.txt")
    }

    /// Path of the frame dump log.
    pub fn dashboard_log(&self) -> PathBuf {
        self.log_dir.join("dashboard.txt")
    }
}
