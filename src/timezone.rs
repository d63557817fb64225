//! Resolving the configured timezone to the offset and month used for "now".

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, Month};

/// The current UTC offset of `canonical_timezone`, e.g. "Asia/Seoul".
///
/// Returns `None` if the timezone is not known.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The month it currently is in `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the timezone is not known.
pub fn current_month(canonical_timezone: &str) -> Result<Month, Error> {
    match get_local_offset(canonical_timezone) {
        Some(offset) => Ok(Month::current(offset)),
        None => {
            tracing::error!("Invalid timezone {canonical_timezone}");
            Err(Error::InvalidTimezoneError(canonical_timezone.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{Error, Month, timezone::current_month};

    #[test]
    fn utc_month_matches_clock() {
        let want = Month::of(OffsetDateTime::now_utc().date());

        assert_eq!(current_month("UTC"), Ok(want));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            current_month("Nowhere/Special"),
            Err(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }
}
