//! Post date-stamp formatting.
//!
//! Renders a timestamp with its timezone offset into the single stamp format
//! the metadata header carries:
//!
//! - Locale style: `YYYY-MM-DD HH:MM:SS UTC+HH:MM`, or a bare trailing `UTC`
//!   when the offset is zero
//! - ISO 8601 style: `YYYY-MM-DD HH:MM:SS+HH:MM`, no `UTC` literal
//!
//! # Examples
//!
//! ```ignore
//! let stamp = mtime_stamp(metadata.modified()?, DateStyle::Locale);
//! // "2015-03-14 09:26:53 UTC+01:00"
//! ```

use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local};

/// Date-stamp rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `... UTC+HH:MM`, or `... UTC` for a zero offset.
    Locale,
    /// `...+HH:MM`, no `UTC` literal.
    Iso8601,
}

impl DateStyle {
    pub const fn from_iso8601(iso8601: bool) -> Self {
        if iso8601 { Self::Iso8601 } else { Self::Locale }
    }
}

/// Format a timestamp (with its timezone offset) as a post date stamp.
pub fn date_stamp(dt: &DateTime<FixedOffset>, style: DateStyle) -> String {
    let offset_sec = dt.offset().local_minus_utc();
    let sign = if offset_sec < 0 { '-' } else { '+' };
    let abs = offset_sec.unsigned_abs();
    let (hours, minutes) = (abs / 3600, (abs % 3600) / 60);

    let base = dt.format("%Y-%m-%d %H:%M:%S");
    match style {
        DateStyle::Iso8601 => format!("{base}{sign}{hours:02}:{minutes:02}"),
        DateStyle::Locale if offset_sec == 0 => format!("{base} UTC"),
        DateStyle::Locale => format!("{base} UTC{sign}{hours:02}:{minutes:02}"),
    }
}

/// Date stamp for a file's last-modification time, in local time.
pub fn mtime_stamp(mtime: SystemTime, style: DateStyle) -> String {
    let local: DateTime<Local> = mtime.into();
    date_stamp(&local.fixed_offset(), style)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_offset(offset_sec: i32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_sec)
            .unwrap()
            .with_ymd_and_hms(2015, 3, 14, 9, 26, 53)
            .unwrap()
    }

    #[test]
    fn test_locale_zero_offset() {
        assert_eq!(
            date_stamp(&at_offset(0), DateStyle::Locale),
            "2015-03-14 09:26:53 UTC"
        );
    }

    #[test]
    fn test_locale_positive_offset() {
        assert_eq!(
            date_stamp(&at_offset(8 * 3600), DateStyle::Locale),
            "2015-03-14 09:26:53 UTC+08:00"
        );
    }

    #[test]
    fn test_locale_negative_half_hour_offset() {
        assert_eq!(
            date_stamp(&at_offset(-(5 * 3600 + 1800)), DateStyle::Locale),
            "2015-03-14 09:26:53 UTC-05:30"
        );
    }

    #[test]
    fn test_iso8601_offsets() {
        assert_eq!(
            date_stamp(&at_offset(3600), DateStyle::Iso8601),
            "2015-03-14 09:26:53+01:00"
        );
        assert_eq!(
            date_stamp(&at_offset(0), DateStyle::Iso8601),
            "2015-03-14 09:26:53+00:00"
        );
    }

    #[test]
    fn test_from_iso8601_flag() {
        assert_eq!(DateStyle::from_iso8601(true), DateStyle::Iso8601);
        assert_eq!(DateStyle::from_iso8601(false), DateStyle::Locale);
    }
}
