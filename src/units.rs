//! Size and duration strings.
//!
//! Job and worker tables usually carry human-readable quantities
//! (`"1.5 GB"`, `"00:42:10"`). These helpers convert them to the bytes and
//! seconds the models use, and format seconds back for reports.
//!
//! Size suffixes use binary multiples: 1 KB = 1024 B.

use crate::error::{AcoError, Result};

const KIB: f64 = 1024.0;

/// Parses a size such as `"512 MB"`, `"1.5gb"`, `"20 B"` or `"4096"` into
/// bytes. Suffixes are case-insensitive; a bare number is taken as bytes.
pub fn parse_size(input: &str) -> Result<f64> {
    let lower = input.trim().to_ascii_lowercase();
    let (number, multiplier) = if let Some(n) = lower.strip_suffix("gb") {
        (n, KIB * KIB * KIB)
    } else if let Some(n) = lower.strip_suffix("mb") {
        (n, KIB * KIB)
    } else if let Some(n) = lower.strip_suffix("kb") {
        (n, KIB)
    } else if let Some(n) = lower.strip_suffix('b') {
        (n, 1.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| AcoError::Parse(format!("invalid size '{input}'")))?;
    if !(value.is_finite() && value >= 0.0) {
        return Err(AcoError::Parse(format!("size must be a non-negative number, got '{input}'")));
    }
    Ok(value * multiplier)
}

/// Parses `"H:MM:SS"` / `"HH:MM:SS"` into seconds.
///
/// Hours may exceed 23; minutes and seconds must be below 60.
pub fn parse_hms(input: &str) -> Result<f64> {
    let invalid = || AcoError::Parse(format!("invalid time '{input}', expected HH:MM:SS"));

    let mut parts = input.trim().split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if m.len() != 2 || s.len() != 2 || h.is_empty() {
        return Err(invalid());
    }

    let field = |part: &str| part.parse::<u64>().map_err(|_| invalid());
    let (hours, minutes, seconds) = (field(h)?, field(m)?, field(s)?);
    if minutes >= 60 || seconds >= 60 {
        return Err(AcoError::Parse(format!(
            "invalid time '{input}': minutes and seconds must be below 60"
        )));
    }
    let total = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| AcoError::Parse(format!("invalid time '{input}': hours out of range")))?;
    Ok(total as f64)
}

/// Parses either `"HH:MM:SS"` or a plain number of seconds.
pub fn parse_seconds(input: &str) -> Result<f64> {
    if input.contains(':') {
        return parse_hms(input);
    }
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| AcoError::Parse(format!("invalid duration '{input}'")))?;
    if !value.is_finite() {
        return Err(AcoError::Parse(format!("invalid duration '{input}'")));
    }
    Ok(value)
}

/// Formats seconds as `"HH:MM:SS"`, with a leading `-` for negative values.
/// Fractional seconds are truncated.
pub fn format_hms(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs() as u64;
    format!(
        "{sign}{:02}:{:02}:{:02}",
        total / 3600,
        total % 3600 / 60,
        total % 60
    )
}

/// Formats seconds as `"H hours M minutes S seconds"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{} hours {} minutes {} seconds",
        total / 3600,
        total % 3600 / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("1 GB").unwrap(), 1_073_741_824.0);
        assert_eq!(parse_size("1.5gb").unwrap(), 1.5 * 1_073_741_824.0);
        assert_eq!(parse_size("512 MB").unwrap(), 512.0 * 1_048_576.0);
        assert_eq!(parse_size(" 2 kB ").unwrap(), 2048.0);
        assert_eq!(parse_size("20 B").unwrap(), 20.0);
        assert_eq!(parse_size("4096").unwrap(), 4096.0);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(matches!(parse_size("lots"), Err(AcoError::Parse(_))));
        assert!(parse_size("GB").is_err());
        assert!(parse_size("-1 MB").is_err());
        assert!(parse_size("3 TB").is_err());
    }

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_hms("01:02:03").unwrap(), 3723.0);
        assert_eq!(parse_hms("1:00:00").unwrap(), 3600.0);
        assert_eq!(parse_hms("100:00:01").unwrap(), 360_001.0);
    }

    #[test]
    fn test_parse_hms_rejects() {
        for bad in ["", "12:00", "00:60:00", "00:00:60", "aa:bb:cc", "1:2:3", "01:02:03:04"] {
            assert!(parse_hms(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_parse_hms_hours_overflow() {
        // Fits in u64 but not once scaled to seconds
        let huge = format!("{}:00:00", u64::MAX / 1000);
        assert!(matches!(parse_hms(&huge), Err(AcoError::Parse(_))));
        // Past u64 entirely
        assert!(parse_hms("99999999999999999999:00:00").is_err());
        let max_hours = u64::MAX / 3600;
        assert_eq!(
            parse_hms(&format!("{max_hours}:00:00")).unwrap(),
            (max_hours * 3600) as f64
        );
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("00:01:30").unwrap(), 90.0);
        assert_eq!(parse_seconds("0.25").unwrap(), 0.25);
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0.0), "00:00:00");
        assert_eq!(format_hms(3723.9), "01:02:03");
        assert_eq!(format_hms(-90.0), "-00:01:30");
        assert_eq!(format_hms(360_001.0), "100:00:01");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3723.0), "1 hours 2 minutes 3 seconds");
        assert_eq!(format_duration(59.9), "0 hours 0 minutes 59 seconds");
    }

    #[test]
    fn test_hms_roundtrip_on_whole_seconds() {
        for secs in [0.0, 59.0, 3600.0, 86_399.0] {
            assert_eq!(parse_hms(&format_hms(secs)).unwrap(), secs);
        }
    }
}
