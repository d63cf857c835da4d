//! Parsing of the diagnostics tool's line-oriented output.

use super::RawObservation;

/// Normalize a raw key: trim, lower-case, underscores to spaces.
pub fn normalize_raw_key(key: &str) -> String {
    key.trim().replace('_', " ").to_lowercase()
}

/// Parse `key: value` lines into a raw observation.
///
/// Each line is split on its first `:` only, so values may themselves
/// contain colons. Lines without a separator are skipped and blank values
/// are recorded as `"0"`. A repeated key keeps its first position and takes
/// the last value.
pub fn parse_output(text: &str) -> RawObservation {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| {
            let value = value.trim();
            let value = if value.is_empty() { "0" } else { value };
            (normalize_raw_key(key), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_lines() {
        let raw = parse_output("uptime: 3600\nsnr: 8.5\n");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["uptime"], "3600");
        assert_eq!(raw["snr"], "8.5");
    }

    #[test]
    fn test_keys_lowercased_and_underscore_free() {
        let raw = parse_output("Pop_Ping_Latency_Ms: 31.2\nHARDWARE_VERSION: rev3_proto2");
        assert_eq!(raw["pop ping latency ms"], "31.2");
        assert_eq!(raw["hardware version"], "rev3_proto2");
        assert!(raw.keys().all(|k| !k.contains('_') && k.to_lowercase() == *k));
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let raw = parse_output("timestamp: 2024-01-01T10:00:00");
        assert_eq!(raw["timestamp"], "2024-01-01T10:00:00");
    }

    #[test]
    fn test_empty_value_becomes_zero() {
        let raw = parse_output("alerts:   \nsnr:");
        assert_eq!(raw["alerts"], "0");
        assert_eq!(raw["snr"], "0");
    }

    #[test]
    fn test_lines_without_separator_skipped() {
        let raw = parse_output("dish status report\n\nsnr: 9\n-----");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw["snr"], "9");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_output("").is_empty());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let raw = parse_output("snr: 3\nsnr: 7");
        assert_eq!(raw["snr"], "7");
    }

    #[test]
    fn test_keys_keep_output_order() {
        let raw = parse_output("uptime: 1\nstate: CONNECTED\nalerts: 0\nuptime: 2");
        let keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["uptime", "state", "alerts"]);
        assert_eq!(raw["uptime"], "2");
    }
}
