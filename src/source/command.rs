//! Subprocess-based diagnostics source.
//!
//! Runs the dish diagnostics tool once per fetch and parses its stdout.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{parse_output, DiagnosticsSource, FetchError, Mode, RawObservation};
use crate::config::Settings;

/// A source that invokes the diagnostics tool as a child process.
///
/// The tool is run as `<interpreter> <script> -v <mode>` from inside the
/// tool directory. Any output on standard error counts as a failed fetch.
#[derive(Debug)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
    description: String,
    last_error: Option<String>,
}

impl CommandSource {
    /// Create a source that runs `program` with the given leading arguments.
    pub fn new<P: AsRef<Path>>(program: &str, args: &[&str], working_dir: P) -> Self {
        let working_dir = working_dir.as_ref().to_path_buf();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let description = format!("{} {} ({})", program, args.join(" "), working_dir.display());
        Self {
            program: program.to_string(),
            args,
            working_dir,
            description,
            last_error: None,
        }
    }

    /// Create a source from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.interpreter, &[settings.script.as_str()], &settings.tool_dir)
    }

    /// Returns the directory the tool runs in.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn run(&self, mode: Mode) -> Result<RawObservation, FetchError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(["-v", mode.as_str()])
            .current_dir(&self.working_dir)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            return Err(FetchError::Stderr(stderr.into_owned()));
        }

        Ok(parse_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl DiagnosticsSource for CommandSource {
    fn fetch(&mut self, mode: Mode) -> RawObservation {
        match self.run(mode) {
            Ok(raw) => {
                self.last_error = None;
                debug!(
                    "Fetched {} data: {}",
                    mode,
                    serde_json::to_string(&raw).unwrap_or_default()
                );
                debug!("Available keys: {:?}", raw.keys().collect::<Vec<_>>());
                raw
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                RawObservation::new()
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
