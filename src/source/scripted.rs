//! In-memory diagnostics source.
//!
//! Replays canned tool output per mode. Useful for rendering the dashboard
//! without a dish on the network, and for driving the refresh loop in tests.

use std::collections::HashMap;

use super::{parse_output, DiagnosticsSource, FetchError, Mode, RawObservation};

#[derive(Debug, Clone)]
enum Script {
    Output(String),
    Failure(String),
}

/// A source that returns fixed output for each mode.
///
/// Modes with nothing scripted produce an empty observation, as the real
/// tool does when it prints nothing.
///
/// # Example
///
/// ```
/// use starlink_dash::{DiagnosticsSource, Mode, ScriptedSource};
///
/// let mut source = ScriptedSource::new()
///     .with_output(Mode::Status, "uptime: 60\n")
///     .with_failure(Mode::PingDrop, "dish unreachable");
///
/// assert_eq!(source.fetch(Mode::Status).len(), 1);
/// assert!(source.fetch(Mode::PingDrop).is_empty());
/// assert_eq!(source.error(), Some("diagnostics tool reported an error: dish unreachable"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedSource {
    scripts: HashMap<Mode, Script>,
    fetches: HashMap<Mode, usize>,
    last_error: Option<String>,
}

impl ScriptedSource {
    /// Create a source with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the tool's stdout for a mode.
    pub fn with_output(mut self, mode: Mode, stdout: &str) -> Self {
        self.scripts.insert(mode, Script::Output(stdout.to_string()));
        self
    }

    /// Script a failure (stderr text) for a mode.
    pub fn with_failure(mut self, mode: Mode, stderr: &str) -> Self {
        self.scripts.insert(mode, Script::Failure(stderr.to_string()));
        self
    }

    /// Number of times `mode` has been fetched.
    pub fn fetch_count(&self, mode: Mode) -> usize {
        self.fetches.get(&mode).copied().unwrap_or(0)
    }
}

impl DiagnosticsSource for ScriptedSource {
    fn fetch(&mut self, mode: Mode) -> RawObservation {
        *self.fetches.entry(mode).or_default() += 1;

        match self.scripts.get(&mode) {
            Some(Script::Output(stdout)) => {
                self.last_error = None;
                parse_output(stdout)
            }
            Some(Script::Failure(stderr)) => {
                self.last_error = Some(FetchError::Stderr(stderr.clone()).to_string());
                RawObservation::new()
            }
            None => {
                self.last_error = None;
                RawObservation::new()
            }
        }
    }

    fn description(&self) -> &str {
        "scripted"
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscripted_mode_is_empty() {
        let mut source = ScriptedSource::new();
        assert!(source.fetch(Mode::Status).is_empty());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_counts_fetches_per_mode() {
        let mut source = ScriptedSource::new().with_output(Mode::Status, "snr: 2");
        source.fetch(Mode::Status);
        source.fetch(Mode::Status);
        source.fetch(Mode::PingDrop);
        assert_eq!(source.fetch_count(Mode::Status), 2);
        assert_eq!(source.fetch_count(Mode::PingDrop), 1);
    }

    #[test]
    fn test_output_replayed_every_fetch() {
        let mut source = ScriptedSource::new().with_output(Mode::Status, "snr: 2");
        assert_eq!(source.fetch(Mode::Status)["snr"], "2");
        assert_eq!(source.fetch(Mode::Status)["snr"], "2");
    }
}
