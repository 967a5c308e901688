//! Resolves the configured timezone to calendar dates.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's date in the timezone named by `local_timezone`.
///
/// # Errors
/// Returns [crate::Error::InvalidTimezoneError] if `local_timezone` is not a
/// canonical timezone name.
pub fn current_local_date(local_timezone: &str) -> Result<Date, crate::Error> {
    let Some(local_offset) = get_local_offset(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(crate::Error::InvalidTimezoneError(local_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}
