//! Canonical metric names and the synonym table.
//!
//! Different versions of the diagnostics tool spell the same metric in
//! different ways. Every spelling the dashboard understands is listed in
//! [`SYNONYMS`]; anything else passes through under its own name.

use std::collections::BTreeMap;

use crate::source::RawObservation;

pub const UPTIME: &str = "uptimes";
pub const SNR: &str = "snr";
pub const LATENCY_MS: &str = "pop ping latency ms";
pub const DOWNLINK_BPS: &str = "downlink throughput bps";
pub const FULL_PING_DROPS: &str = "count full ping drop";
pub const PARTIAL_PING_DROPS: &str = "count partial ping drop";
pub const HARDWARE_VERSION: &str = "hardware version";
pub const SOFTWARE_VERSION: &str = "software version";
pub const GPS_SATS: &str = "gps sats";
pub const SNR_ABOVE_NOISE_FLOOR: &str = "is snr above noise floor";

/// Raw key spelling to canonical metric name.
///
/// Every canonical name maps to itself, which keeps normalization
/// idempotent.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("uptime", UPTIME),
    (UPTIME, UPTIME),
    ("snr", SNR),
    ("signal to noise ratio", SNR),
    (LATENCY_MS, LATENCY_MS),
    (DOWNLINK_BPS, DOWNLINK_BPS),
    ("pop ping drop rate", FULL_PING_DROPS),
    (FULL_PING_DROPS, FULL_PING_DROPS),
    (PARTIAL_PING_DROPS, PARTIAL_PING_DROPS),
    (HARDWARE_VERSION, HARDWARE_VERSION),
    (SOFTWARE_VERSION, SOFTWARE_VERSION),
    (GPS_SATS, GPS_SATS),
    (SNR_ABOVE_NOISE_FLOOR, SNR_ABOVE_NOISE_FLOOR),
];

/// Observation keyed by canonical metric names.
///
/// Unknown keys are carried along unchanged.
pub type CanonicalObservation = BTreeMap<String, String>;

/// Look up the canonical name for a raw key.
pub fn canonical_name(key: &str) -> Option<&'static str> {
    SYNONYMS.iter().find(|(alias, _)| *alias == key).map(|(_, canonical)| *canonical)
}

/// Map every key of a raw observation onto its canonical name.
///
/// When two raw keys share a canonical name, the one the tool printed later
/// wins.
pub fn normalize(raw: &RawObservation) -> CanonicalObservation {
    raw.iter()
        .map(|(key, value)| {
            let key = canonical_name(key).map(str::to_string).unwrap_or_else(|| key.clone());
            (key, value.clone())
        })
        .collect()
}

/// Build a cycle's observation: status first, ping drop overlaid on top.
pub fn merge(status: &RawObservation, ping: &RawObservation) -> CanonicalObservation {
    let mut merged = normalize(status);
    merged.extend(normalize(ping));
    merged
}

/// Raw keys the synonym table does not recognise.
pub fn unmapped_keys(raw: &RawObservation) -> Vec<&str> {
    raw.keys().map(String::as_str).filter(|key| canonical_name(key).is_none()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawObservation {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let canonical = normalize(&raw(&[
            ("uptime", "100"),
            ("signal to noise ratio", "7"),
            ("pop ping drop rate", "2"),
        ]));
        assert_eq!(canonical[UPTIME], "100");
        assert_eq!(canonical[SNR], "7");
        assert_eq!(canonical[FULL_PING_DROPS], "2");
        assert!(!canonical.contains_key("uptime"));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let canonical = normalize(&raw(&[("alert motors stuck", "false")]));
        assert_eq!(canonical["alert motors stuck"], "false");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&raw(&[
            ("uptime", "100"),
            ("snr", "9"),
            ("gps sats", "12"),
            ("state", "CONNECTED"),
        ]));
        let again: RawObservation = once.clone().into_iter().collect();
        assert_eq!(normalize(&again), once);
    }

    #[test]
    fn test_colliding_synonyms_follow_output_order() {
        let full_last = normalize(&raw(&[("pop ping drop rate", "2"), ("count full ping drop", "5")]));
        assert_eq!(full_last[FULL_PING_DROPS], "5");

        let rate_last = normalize(&raw(&[("count full ping drop", "5"), ("pop ping drop rate", "2")]));
        assert_eq!(rate_last[FULL_PING_DROPS], "2");
    }

    #[test]
    fn test_every_canonical_name_maps_to_itself() {
        for (_, canonical) in SYNONYMS {
            assert_eq!(canonical_name(canonical), Some(*canonical));
        }
    }

    #[test]
    fn test_merge_ping_overlays_status() {
        let status = raw(&[("uptime", "100"), ("count full ping drop", "1")]);
        let ping = raw(&[("pop ping drop rate", "4")]);
        let merged = merge(&status, &ping);
        assert_eq!(merged[UPTIME], "100");
        assert_eq!(merged[FULL_PING_DROPS], "4");
    }

    #[test]
    fn test_merge_with_identical_observations() {
        let status = raw(&[("snr", "5")]);
        assert_eq!(merge(&status, &status), normalize(&status));
    }

    #[test]
    fn test_unmapped_keys() {
        let observation = raw(&[("uptime", "1"), ("state", "CONNECTED"), ("alerts", "0")]);
        assert_eq!(unmapped_keys(&observation), vec!["state", "alerts"]);
        assert!(unmapped_keys(&RawObservation::new()).is_empty());
    }
}
