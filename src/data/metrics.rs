//! Typed view of a canonical observation.
//!
//! Extraction never fails: every missing or unparseable field falls back
//! to a documented default.

use std::time::Duration;

use super::duration::{parse_number, parse_uptime};
use super::normalize::{
    CanonicalObservation, DOWNLINK_BPS, FULL_PING_DROPS, GPS_SATS, HARDWARE_VERSION, LATENCY_MS,
    PARTIAL_PING_DROPS, SNR, SNR_ABOVE_NOISE_FLOOR, SOFTWARE_VERSION, UPTIME,
};

/// Placeholder shown for missing version and GPS fields.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder shown when there is no SNR reading.
pub const NO_READING: &str = "N/A";

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Metrics ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMetrics {
    /// Dish uptime, whole seconds.
    pub uptime: Duration,
    /// SNR exactly as reported, or `"N/A"`.
    pub snr: String,
    /// PoP ping latency in milliseconds, never negative.
    pub latency_ms: f64,
    /// Downlink throughput in megabits per second.
    pub downlink_mbps: f64,
    pub full_outages: u64,
    pub partial_outages: u64,
    pub hardware_version: String,
    pub software_version: String,
    pub gps_sats: String,
    /// Whether SNR is above the noise floor.
    pub snr_above_noise_floor: bool,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            uptime: Duration::ZERO,
            snr: NO_READING.to_string(),
            latency_ms: 0.0,
            downlink_mbps: 0.0,
            full_outages: 0,
            partial_outages: 0,
            hardware_version: UNKNOWN.to_string(),
            software_version: UNKNOWN.to_string(),
            gps_sats: UNKNOWN.to_string(),
            snr_above_noise_floor: false,
        }
    }
}

impl DisplayMetrics {
    /// Extract display metrics from a canonical observation.
    pub fn extract(canonical: &CanonicalObservation) -> Self {
        let get = |key: &str| canonical.get(key).map(String::as_str);
        let number = |key: &str| get(key).and_then(parse_number).unwrap_or(0.0);
        let count = |key: &str| number(key).max(0.0) as u64;
        let text = |key: &str| get(key).unwrap_or(UNKNOWN).to_string();

        Self {
            uptime: get(UPTIME).map(parse_uptime).unwrap_or_default(),
            snr: get(SNR).unwrap_or(NO_READING).to_string(),
            latency_ms: number(LATENCY_MS).max(0.0),
            downlink_mbps: number(DOWNLINK_BPS) / BITS_PER_MEGABIT,
            full_outages: count(FULL_PING_DROPS),
            partial_outages: count(PARTIAL_PING_DROPS),
            hardware_version: text(HARDWARE_VERSION),
            software_version: text(SOFTWARE_VERSION),
            gps_sats: text(GPS_SATS),
            snr_above_noise_floor: get(SNR_ABOVE_NOISE_FLOOR)
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }

    /// Numeric SNR, or `None` when there is no usable reading.
    ///
    /// `"N/A"` and `"0"` are the tool's ways of saying "no reading".
    pub fn snr_reading(&self) -> Option<f64> {
        if self.has_snr() {
            parse_number(&self.snr)
        } else {
            None
        }
    }

    /// SNR as it should be displayed.
    pub fn snr_display(&self) -> &str {
        if self.has_snr() {
            &self.snr
        } else {
            NO_READING
        }
    }

    /// Sum of full and partial outages.
    pub fn total_outages(&self) -> u64 {
        self.full_outages.saturating_add(self.partial_outages)
    }

    fn has_snr(&self) -> bool {
        self.snr != NO_READING && self.snr != "0"
    }
}
