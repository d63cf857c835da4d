//! Dashboard rendering.
//!
//! Rendering produces plain strings with embedded color markup; writing
//! them to the terminal is the refresh loop's job.
//!
//! ## Submodules
//!
//! - [`dashboard`]: The fixed 11-line frame and its layout
//! - [`bar`]: Fixed-width glyph progress bars
//! - [`theme`]: Immutable color palette
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ 1  title                                 │
//! │ 2  hardware / software / satellites      │
//! │ 3  uptime label       4  uptime bar      │
//! │ 5  latency label      6  latency bar     │
//! │ 7  throughput label   8  throughput bar  │
//! │ 9  SNR or outages    10  matching bar    │
//! │ 11 exit hint                             │
//! └──────────────────────────────────────────┘
//! ```

pub mod bar;
pub mod dashboard;
pub mod theme;

pub use dashboard::{render, strip_ansi, Dashboard, DASHBOARD_LINES};
pub use theme::Palette;
