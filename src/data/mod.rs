//! Metric normalization and extraction.
//!
//! This module turns raw observations from the diagnostics tool into the
//! typed, defaulted values the dashboard displays.
//!
//! ## Submodules
//!
//! - [`normalize`]: Synonym table mapping raw key spellings onto canonical names
//! - [`metrics`]: Typed [`DisplayMetrics`] with documented defaults
//! - [`duration`]: Lenient number parsing and uptime formatting
//!
//! ## Data Flow
//!
//! ```text
//! RawObservation (status)   RawObservation (ping_drop)
//!        │                          │
//!        └──────────┬───────────────┘
//!                   ▼
//!         normalize::merge()  ──▶ unmapped_keys() (debug log)
//!                   │
//!                   ▼
//!        CanonicalObservation
//!                   │
//!                   ▼
//!       DisplayMetrics::extract()
//! ```

pub mod duration;
pub mod metrics;
pub mod normalize;

pub use metrics::DisplayMetrics;
pub use normalize::{merge, normalize, unmapped_keys, CanonicalObservation};
