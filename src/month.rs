//! Calendar months used to select which transactions a summary covers.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::Error;

/// The years that a [Month] may be parsed from, the same range as [Date].
const YEARS: std::ops::RangeInclusive<i32> = Date::MIN.year()..=Date::MAX.year();

/// A calendar month in a particular year, e.g. March 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    year: i32,
    month: time::Month,
}

impl Month {
    /// Create a month from a year and a month of that year.
    pub fn new(year: i32, month: time::Month) -> Self {
        Self { year, month }
    }

    /// The month that contains `date`.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The current month at `local_offset`.
    pub fn current(local_offset: UtcOffset) -> Self {
        Self::of(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }

    /// The year, e.g. 2024.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> time::Month {
        self.month
    }

    /// Whether `date` falls in this month, i.e. has the same year and month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month before this one, or `None` if it would be before the
    /// earliest representable date.
    pub fn previous(&self) -> Option<Self> {
        let previous = match self.month {
            time::Month::January => Self::new(self.year.checked_sub(1)?, time::Month::December),
            month => Self::new(self.year, month.previous()),
        };

        YEARS.contains(&previous.year).then_some(previous)
    }

    /// The month after this one, or `None` if it would be after the latest
    /// representable date.
    pub fn next(&self) -> Option<Self> {
        let next = match self.month {
            time::Month::December => Self::new(self.year.checked_add(1)?, time::Month::January),
            month => Self::new(self.year, month.next()),
        };

        YEARS.contains(&next.year).then_some(next)
    }

    /// A human readable label, e.g. "March 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Parse a month written as "YYYY-MM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        if !YEARS.contains(&year) {
            return Err(invalid());
        }
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = time::Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, Month};

    #[test]
    fn contains_requires_same_year_and_month() {
        let month = Month::new(2024, time::Month::March);

        assert!(month.contains(date!(2024 - 03 - 01)));
        assert!(month.contains(date!(2024 - 03 - 31)));
        assert!(!month.contains(date!(2024 - 04 - 01)));
        assert!(!month.contains(date!(2023 - 03 - 15)));
    }

    #[test]
    fn previous_and_next_wrap_around_years() {
        let january = Month::new(2024, time::Month::January);
        let december = Month::new(2023, time::Month::December);

        assert_eq!(january.previous(), Some(december));
        assert_eq!(december.next(), Some(january));
    }

    #[test]
    fn no_month_beyond_representable_dates() {
        let last: Month = "9999-12".parse().unwrap();
        let first: Month = "-9999-01".parse().unwrap();

        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(Month::new(9999, time::Month::November)));
        assert_eq!(first.previous(), None);
        assert_eq!(Month::new(i32::MAX, time::Month::December).next(), None);
        assert_eq!(Month::new(i32::MIN, time::Month::January).previous(), None);
    }

    #[test]
    fn parses_and_displays_year_month() {
        let month: Month = "2024-03".parse().unwrap();

        assert_eq!(month, Month::new(2024, time::Month::March));
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!(month.label(), "March 2024");
    }

    #[test]
    fn rejects_invalid_months() {
        for input in [
            "2024",
            "2024-13",
            "2024-00",
            "march",
            "2024-xx",
            "10000-01",
            "2147483647-12",
        ] {
            assert_eq!(
                input.parse::<Month>(),
                Err(Error::InvalidMonth(input.to_owned())),
                "input {input:?}"
            );
        }
    }
}
