use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Parse a metric value as a float, tolerating trailing units.
///
/// `"31.5"` and `"31.5ms"` both give `31.5`. Returns `None` when no leading
/// number is present or the number is not finite.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let value = s.parse::<f64>().ok().or_else(|| {
        (1..s.len())
            .rev()
            .filter(|&end| s.is_char_boundary(end))
            .find_map(|end| s[..end].parse::<f64>().ok())
    })?;
    value.is_finite().then_some(value)
}

/// Parse an uptime value into a duration of whole seconds.
///
/// Unparseable or negative values give zero.
pub fn parse_uptime(s: &str) -> Duration {
    let secs = parse_number(s).unwrap_or(0.0);
    Duration::from_secs(secs.max(0.0) as u64)
}

/// Format an uptime as days, hours and minutes, e.g. `"1d 01h 01m"`.
pub fn format_uptime(d: Duration) -> String {
    let secs = d.as_secs();
    let days = secs / SECS_PER_DAY;
    let hours = (secs % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    format!("{}d {:02}h {:02}m", days, hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_uptime(Duration::ZERO), "0d 00h 00m");
    }

    #[test]
    fn test_format_day_hour_minute() {
        assert_eq!(format_uptime(Duration::from_secs(90061)), "1d 01h 01m");
    }

    #[test]
    fn test_format_non_numeric() {
        assert_eq!(format_uptime(parse_uptime("not a number")), "0d 00h 00m");
    }

    #[test]
    fn test_parse_uptime_truncates_fraction() {
        assert_eq!(parse_uptime("3599.99"), Duration::from_secs(3599));
        assert_eq!(parse_uptime("-5"), Duration::ZERO);
    }

    #[test]
    fn test_parse_number_leading_numeric() {
        assert_eq!(parse_number("3600s"), Some(3600.0));
        assert_eq!(parse_number(" 20.5 ms "), Some(20.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number("N/A"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
