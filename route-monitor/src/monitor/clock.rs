//! Run clock
//!
//! A report captures "now" exactly once, in US Eastern time, and threads it
//! through every stage.

use anyhow::{Result, bail};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// Time zone all timestamps and gates are interpreted in
pub const REPORT_TZ: Tz = New_York;

/// Current wall-clock time in US Eastern
pub fn capture_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&REPORT_TZ)
}

/// Parse an injected Eastern local time ("YYYY-MM-DD HH:MM[:SS]")
///
/// Handles DST transitions via chrono-tz: ambiguous times take the earlier
/// instant, times inside the spring-forward gap are rejected.
pub fn parse_now_override(s: &str) -> Result<DateTime<Tz>> {
    let s = s.trim();
    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());

    let Some(naive) = naive else {
        bail!("Invalid --now value '{}', expected YYYY-MM-DD HH:MM[:SS]", s);
    };

    match REPORT_TZ.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier),
        LocalResult::None => bail!("Invalid Eastern time (DST gap): {}", naive),
    }
}
