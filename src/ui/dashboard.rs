//! Fixed-geometry dashboard rendering.
//!
//! Every frame is exactly [`DASHBOARD_LINES`] lines tall so that redrawing
//! from the top-left corner always overwrites the previous frame cleanly.

use std::fmt;

use super::bar::progress_bar;
use super::Palette;
use crate::data::duration::format_uptime;
use crate::data::DisplayMetrics;
use crate::source::Mode;

/// Number of lines in every rendered frame.
pub const DASHBOARD_LINES: usize = 11;

/// Uptime that fills the uptime bar.
const UPTIME_FULL_SECS: f64 = 30.0 * 24.0 * 3600.0;
/// Latency that fills the latency bar.
const LATENCY_FULL_MS: f64 = 100.0;
/// Throughput that fills the throughput bar.
const DOWNLINK_FULL_MBPS: f64 = 200.0;
/// Outage count that fills the outage bar.
const OUTAGES_FULL: f64 = 10.0;
/// SNR that fills the quality bar.
const SNR_FULL: f64 = 10.0;

/// One rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    lines: Vec<String>,
}

impl Dashboard {
    /// Build a frame, padding with blank lines or truncating to
    /// [`DASHBOARD_LINES`].
    ///
    /// Embedded newlines split a line in two before the count is enforced.
    /// Carriage returns are dropped so a line can never rewind the cursor.
    pub fn from_lines<I: IntoIterator<Item = String>>(lines: I) -> Self {
        let mut lines: Vec<String> = lines
            .into_iter()
            .flat_map(|line| {
                line.split('\n')
                    .map(|part| part.replace('\r', ""))
                    .collect::<Vec<_>>()
            })
            .collect();
        lines.resize(DASHBOARD_LINES, String::new());
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Longest line, counted in visible characters.
    pub fn max_line_length(&self) -> usize {
        self.lines.iter().map(|line| visible_width(line.trim_end())).max().unwrap_or(0)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Render the dashboard for the given metrics and mode.
pub fn render(metrics: &DisplayMetrics, mode: Mode, palette: &Palette) -> Dashboard {
    let uptime_secs = metrics.uptime.as_secs_f64();

    let mut lines = vec![
        format!("--- {} ---", palette.title("Starlink Diagnostics")),
        format!(
            "{}{} {} {} {}{}",
            palette.label("HW:"),
            palette.value(&format!(" {}", metrics.hardware_version)),
            palette.label("| SW:"),
            palette.value(&metrics.software_version),
            palette.label("| SATS:"),
            palette.value(&format!(" {}", metrics.gps_sats)),
        ),
        format!("{} Online: {}", palette.label("[ UPT ]"), format_uptime(metrics.uptime)),
        format!("Status:  {}", progress_bar(uptime_secs, UPTIME_FULL_SECS, '█', palette)),
        format!("{} Latency: {:.1} ms", palette.label("[ LAT ]"), metrics.latency_ms),
        format!(
            "Signal:  {}",
            progress_bar(metrics.latency_ms, LATENCY_FULL_MS, '▉', palette)
        ),
        format!("{} Down: {:.2} Mbps", palette.label("[ TPT ]"), metrics.downlink_mbps),
        format!(
            "Stream:  {}",
            progress_bar(metrics.downlink_mbps, DOWNLINK_FULL_MBPS, '▉', palette)
        ),
    ];

    match mode {
        Mode::PingDrop => {
            let total = metrics.total_outages();
            lines.push(format!(
                "{} Outages: {} ({} full, {} partial)",
                palette.label("[ OUT ]"),
                total,
                metrics.full_outages,
                metrics.partial_outages
            ));
            lines.push(format!(
                "Grid:    {}",
                progress_bar(total as f64, OUTAGES_FULL, '▒', palette)
            ));
        }
        Mode::Status => {
            let quality = if metrics.snr_above_noise_floor { "Good" } else { "Weak" };
            lines.push(format!(
                "{} Signal: {} ({})",
                palette.label("[ SNR ]"),
                metrics.snr_display(),
                quality
            ));
            lines.push(format!(
                "Quality: {}",
                progress_bar(metrics.snr_reading().unwrap_or(0.0), SNR_FULL, '━', palette)
            ));
        }
    }

    lines.push(palette.label("Press Ctrl+C to exit."));

    Dashboard::from_lines(lines)
}

/// Strip ANSI escape sequences, leaving the visible text.
pub fn strip_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // CSI sequences end at the first byte in '@'..='~'.
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Width of a line in characters, ignoring ANSI escape sequences.
pub fn visible_width(line: &str) -> usize {
    strip_ansi(line).chars().count()
}
