//! Strict ISO-8601 UTC timestamp detection for range bounds.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `YYYY-MM-DDTHH:MM:SS[.fraction]Z`, nothing else.
#[allow(clippy::expect_used)]
static ISO_UTC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?Z$")
        .expect("literal pattern")
});

/// Check if a string has the strict ISO-8601 UTC shape.
///
/// Only the shape is checked; `2023-13-45T00:00:00Z` matches.
///
/// # Example
///
/// ```
/// use mik_filter::is_iso_utc_timestamp;
///
/// assert!(is_iso_utc_timestamp("2023-12-31T00:00:00Z"));
/// assert!(is_iso_utc_timestamp("2023-12-31T00:00:00.125Z"));
/// assert!(!is_iso_utc_timestamp("2023-12-31"));
/// assert!(!is_iso_utc_timestamp("2023-12-31T00:00:00+02:00"));
/// ```
#[must_use]
pub fn is_iso_utc_timestamp(s: &str) -> bool {
    ISO_UTC.is_match(s)
}

/// Parse a strict ISO-8601 UTC timestamp.
///
/// Returns `None` for other shapes and for calendar-invalid dates.
#[must_use]
pub fn parse_utc_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if !is_iso_utc_timestamp(s) {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
