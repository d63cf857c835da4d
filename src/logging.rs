//! Log files.
//!
//! Two append-only text logs live in the log directory, both truncated at
//! startup:
//!
//! - `errors.txt` receives every `tracing` event as
//!   `[YYYY-MM-DD HH:MM:SS] LEVEL: message`.
//! - `dashboard.txt` receives a numbered dump of every rendered frame.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::ui::Dashboard;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR_WIDTH: usize = 80;

/// Current local time, formatted for log lines.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Event format for the error log: `[timestamp] LEVEL: message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogFormat;

impl<S, N> FormatEvent<S, N> for ErrorLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] {}: ", timestamp(), event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber that writes error-log lines to `make_writer`.
///
/// Verbosity defaults to `debug` and can be narrowed with `RUST_LOG`.
pub fn error_log_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .event_format(ErrorLogFormat)
        .with_writer(make_writer)
        .finish()
}

/// Truncate the error log, write its header, and route `tracing` into it.
pub fn init_error_log(path: &Path) -> Result<()> {
    let mut file = create_fresh(path)?;
    writeln!(file, "[{}] Starting Starlink Monitor", timestamp())?;
    tracing::subscriber::set_global_default(error_log_subscriber(Mutex::new(file)))
        .context("failed to install error log")?;
    Ok(())
}

fn create_fresh(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// Format one frame for the dashboard log.
pub fn format_frame_entry(frame: &Dashboard, timestamp: &str) -> String {
    let mut entry = format!(
        "[{}] Dashboard (lines: {}, max length: {}):\n",
        timestamp,
        frame.lines().len(),
        frame.max_line_length()
    );
    for (i, line) in frame.lines().iter().enumerate() {
        entry.push_str(&format!("{:2}: {}\n", i + 1, line));
    }
    entry.push_str(&"-".repeat(SEPARATOR_WIDTH));
    entry.push('\n');
    entry
}

/// Append-only sink for rendered frames.
#[derive(Debug)]
pub struct DashboardLog<W: Write> {
    writer: W,
}

impl DashboardLog<File> {
    /// Truncate the dashboard log at `path` and write its header.
    pub fn create(path: &Path) -> Result<Self> {
        let mut file = create_fresh(path)?;
        writeln!(file, "[{}] Starting Dashboard Log", timestamp())?;
        Ok(Self::new(file))
    }
}

impl<W: Write> DashboardLog<W> {
    /// Wrap an already-open writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Append a frame with line numbers and its geometry.
    pub fn record(&mut self, frame: &Dashboard) -> io::Result<()> {
        self.writer.write_all(format_frame_entry(frame, &timestamp()).as_bytes())?;
        self.writer.flush()?;
        debug!(
            "Rendered dashboard with {} lines, max length {}",
            frame.lines().len(),
            frame.max_line_length()
        );
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

/// In-memory log writer shared by tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        pub(crate) fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::Captured;
    use super::*;

    fn frame() -> Dashboard {
        Dashboard::from_lines(["first", "second line"].map(String::from))
    }

    #[test]
    fn test_frame_entry_format() {
        let entry = format_frame_entry(&frame(), "2024-05-01 12:00:00");
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(lines[0], "[2024-05-01 12:00:00] Dashboard (lines: 11, max length: 11):");
        assert_eq!(lines[1], " 1: first");
        assert_eq!(lines[2], " 2: second line");
        assert_eq!(lines[11], "11: ");
        assert_eq!(lines[12], "-".repeat(80));
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_dashboard_log_appends() {
        let mut log = DashboardLog::new(Vec::new());
        log.record(&frame()).unwrap();
        log.record(&frame()).unwrap();
        let text = String::from_utf8(log.get_ref().clone()).unwrap();
        assert_eq!(text.matches("Dashboard (lines: 11").count(), 2);
    }

    #[test]
    fn test_dashboard_log_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.txt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale contents\n").unwrap();

        let mut log = DashboardLog::create(&path).unwrap();
        log.record(&frame()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.lines().next().unwrap().ends_with("Starting Dashboard Log"));
        assert!(text.contains(" 1: first"));
    }

    #[test]
    fn test_create_makes_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dashboard.txt");
        DashboardLog::create(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_error_log_line_format() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = error_log_subscriber(move || sink.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("Error fetching status data: boom");
            tracing::debug!("Available keys: []");
        });

        let text = captured.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] ERROR: Error fetching status data: boom"));
        assert!(lines[1].ends_with("] DEBUG: Available keys: []"));
    }
}
