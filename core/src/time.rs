//! Time related utils.

use crate::Result;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the time type used across postsign, always in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
pub const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601: "20220313T072004Z"
pub const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Time format for ISO 8601: "2022-03-13T07:20:04Z"
pub const ISO8601_WITH_SEPARATOR: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Read the current wall-clock time.
///
/// Fails when the system clock reports a time before the Unix epoch: a
/// policy stamped with such a time can never verify, so we refuse to sign.
pub fn now() -> Result<DateTime> {
    let t = std::time::SystemTime::now();
    t.duration_since(std::time::UNIX_EPOCH)?;
    Ok(DateTime::from(t))
}

/// Format time into date: "20220313"
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Format time into ISO 8601 with separators: "2022-03-13T07:20:04Z"
pub fn format_iso8601_with_separator(t: DateTime) -> String {
    t.format(ISO8601_WITH_SEPARATOR).to_string()
}

/// Parse an ISO 8601 string with separators back into time.
pub fn parse_iso8601_with_separator(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, ISO8601_WITH_SEPARATOR).map_err(|e| {
        crate::Error::policy_invalid(format!("invalid ISO 8601 timestamp: {s}")).with_source(e)
    })?;
    Ok(t.and_utc())
}
