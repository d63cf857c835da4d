//! Diagnostics source abstraction.
//!
//! This module provides a trait-based abstraction for obtaining raw
//! `key: value` observations from the dish diagnostics tool, either by
//! running the tool as a subprocess or by replaying canned output.

mod command;
mod parse;
mod scripted;

pub use command::CommandSource;
pub use parse::{normalize_raw_key, parse_output};
pub use scripted::ScriptedSource;

use std::fmt::{self, Debug};

use clap::ValueEnum;
use indexmap::IndexMap;
use thiserror::Error;

/// One poll's worth of raw metrics.
///
/// Keys are lower-cased with underscores replaced by spaces and kept in the
/// order the tool printed them. Values are never empty; blank values are
/// recorded as `"0"`.
pub type RawObservation = IndexMap<String, String>;

/// Diagnostics mode requested from the tool.
///
/// The mode also selects which secondary section the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Mode {
    /// General dish status: uptime, SNR, versions, throughput.
    #[default]
    #[value(name = "status")]
    Status,
    /// Ping drop statistics, shown as outage counts.
    #[value(name = "ping_drop")]
    PingDrop,
}

impl Mode {
    /// Identifier passed to the diagnostics tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Status => "status",
            Mode::PingDrop => "ping_drop",
        }
    }

    /// Whether this display mode needs a separate ping drop fetch.
    pub fn needs_ping_fetch(&self) -> bool {
        matches!(self, Mode::PingDrop)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a fetch produced no data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The diagnostics tool could not be started.
    #[error("failed to run diagnostics tool: {0}")]
    Spawn(#[from] std::io::Error),

    /// The diagnostics tool wrote to standard error.
    #[error("diagnostics tool reported an error: {0}")]
    Stderr(String),
}

/// Trait for fetching raw observations from a diagnostics backend.
///
/// Implementations never fail outright: a failed fetch yields an empty
/// observation and records the failure, retrievable through [`error`].
/// Reporting the failure is left to the caller.
///
/// [`error`]: DiagnosticsSource::error
///
/// # Example
///
/// ```
/// use starlink_dash::{DiagnosticsSource, Mode, ScriptedSource};
///
/// let mut source = ScriptedSource::new().with_output(Mode::Status, "snr: 8\n");
/// let raw = source.fetch(Mode::Status);
/// assert_eq!(raw.get("snr").map(String::as_str), Some("8"));
/// ```
pub trait DiagnosticsSource: Debug {
    /// Fetch one observation for the given mode.
    ///
    /// Returns an empty observation if the fetch failed. This method blocks
    /// until the backend has produced its output.
    fn fetch(&mut self, mode: Mode) -> RawObservation;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message from the last fetch, if it failed.
    fn error(&self) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_identifiers() {
        assert_eq!(Mode::Status.as_str(), "status");
        assert_eq!(Mode::PingDrop.to_string(), "ping_drop");
        assert_eq!(Mode::default(), Mode::Status);
    }

    #[test]
    fn test_mode_from_cli_value() {
        assert_eq!(Mode::from_str("ping_drop", false).unwrap(), Mode::PingDrop);
        assert_eq!(Mode::from_str("status", false).unwrap(), Mode::Status);
        assert!(Mode::from_str("bogus", false).is_err());
    }

    #[test]
    fn test_only_ping_drop_needs_second_fetch() {
        assert!(Mode::PingDrop.needs_ping_fetch());
        assert!(!Mode::Status.needs_ping_fetch());
    }
}
