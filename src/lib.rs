//! # starlink-dash
//!
//! A terminal dashboard for watching Starlink dish link health.
//!
//! The dashboard polls the dish diagnostics tool once per second, maps the
//! tool's metric names onto a canonical vocabulary, and redraws a fixed
//! 11-line, color-coded frame in place.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        RefreshLoop (app)                     │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │ source  │───▶│   data   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (fetch) │    │(normalize│    │(render) │    │ + logs   │ │
//! │  └────┬────┘    │ extract) │    └─────────┘    └──────────┘ │
//! │       │         └──────────┘                                 │
//! │       ▼                                                      │
//! │  CommandSource | ScriptedSource                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`DiagnosticsSource`] trait, a subprocess-backed
//!   [`CommandSource`], and the `key: value` output parser
//! - **[`data`]**: Synonym normalization and typed [`DisplayMetrics`] extraction
//! - **[`ui`]**: Progress bars, palette, and the fixed-height [`Dashboard`]
//! - **[`app`]**: The [`RefreshLoop`] state machine and its cancellation check point
//! - **[`config`]**: Layered [`Settings`]
//! - **[`logging`]**: The error log and the frame dump log
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Signal quality view
//! starlink-dash
//!
//! # Outage view, polling ping drop statistics as well
//! starlink-dash --mode ping_drop
//! ```
//!
//! ### As a library
//!
//! ```
//! use starlink_dash::{DashboardLog, Mode, Palette, RefreshLoop, ScriptedSource};
//!
//! let source = ScriptedSource::new().with_output(Mode::Status, "uptime: 90061\nsnr: 9\n");
//! let mut refresh = RefreshLoop::new(
//!     source,
//!     Mode::Status,
//!     Palette::starlink(),
//!     Vec::<u8>::new(),
//!     DashboardLog::new(Vec::<u8>::new()),
//! );
//!
//! let frame = refresh.cycle().unwrap();
//! assert_eq!(frame.lines().len(), 11);
//! assert!(frame.lines()[2].contains("1d 01h 01m"));
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{LoopState, RefreshLoop, Shutdown, SignalShutdown, StopReason, CADENCE};
pub use config::Settings;
pub use data::{CanonicalObservation, DisplayMetrics};
pub use logging::DashboardLog;
pub use source::{CommandSource, DiagnosticsSource, FetchError, Mode, RawObservation, ScriptedSource};
pub use ui::{Dashboard, Palette, DASHBOARD_LINES};
