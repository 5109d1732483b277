use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_IN_MONTH_360, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::error::CalendarError;
use crate::prelude::*;

/// The leap-year rule a date/time is validated against.
///
/// Every rule applies proleptically to all astronomical years, including
/// year 0 and negative years. Historical reform gaps are not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum CalendarKind {
    /// Gregorian leap rule (`standard`, `gregorian`, `proleptic_gregorian`)
    #[default]
    #[display(fmt = "standard")]
    Standard,
    /// Leap year every fourth year
    #[display(fmt = "julian")]
    Julian,
    /// February always has 28 days (`noleap`, `365_day`)
    #[display(fmt = "noleap")]
    NoLeap,
    /// February always has 29 days (`all_leap`, `366_day`)
    #[display(fmt = "all_leap")]
    AllLeap,
    /// Twelve months of thirty days
    #[display(fmt = "360_day")]
    Day360,
}

impl CalendarKind {
    /// All supported calendars, in declaration order.
    pub const ALL: [Self; 5] = [Self::Standard, Self::Julian, Self::NoLeap, Self::AllLeap, Self::Day360];

    /// Whether `year` (astronomical) is a leap year under this calendar.
    pub const fn is_leap_year(self, year: i64) -> bool {
        match self {
            Self::Standard => {
                (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
                    || year.rem_euclid(GREGORIAN_CYCLE) == 0
            }
            Self::Julian => year.rem_euclid(LEAP_YEAR_CYCLE) == 0,
            Self::NoLeap | Self::Day360 => false,
            Self::AllLeap => true,
        }
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if `month` is not in `1..=12`.
    pub fn days_in_month(self, year: i64, month: u8) -> Result<u8, CalendarError> {
        if month == 0 || month > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(month));
        }
        let days = match self {
            Self::Day360 => DAYS_IN_MONTH_360,
            _ if month == FEBRUARY && self.is_leap_year(year) => FEBRUARY_DAYS_LEAP,
            _ => DAYS_IN_MONTH[month as usize],
        };
        Ok(days)
    }

    /// Whether values in this calendar can be handed to a native
    /// (proleptic Gregorian) timestamp.
    pub const fn is_native_compatible(self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl FromStr for CalendarKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Self::Standard),
            "julian" => Ok(Self::Julian),
            "noleap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "366_day" => Ok(Self::AllLeap),
            "360_day" => Ok(Self::Day360),
            _ => Err(CalendarError::UnknownCalendar(s.to_owned())),
        }
    }
}

impl Serialize for CalendarKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_leap_rule() {
        let cal = CalendarKind::Standard;
        assert!(cal.is_leap_year(2000));
        assert!(cal.is_leap_year(2024));
        assert!(!cal.is_leap_year(1900));
        assert!(!cal.is_leap_year(2023));
        // 1 BC and 5 BC are leap years in astronomical numbering
        assert!(cal.is_leap_year(0));
        assert!(cal.is_leap_year(-4));
        assert!(!cal.is_leap_year(-1));
        assert!(!cal.is_leap_year(-100));
        assert!(cal.is_leap_year(-400));
    }

    #[test]
    fn test_days_in_month_by_calendar() {
        struct TestCase {
            calendar: CalendarKind,
            year:     i64,
            month:    u8,
            expected: u8,
        }

        let cases = [
            TestCase { calendar: CalendarKind::Standard, year: 1900, month: 2, expected: 28 },
            TestCase { calendar: CalendarKind::Julian, year: 1900, month: 2, expected: 29 },
            TestCase { calendar: CalendarKind::Julian, year: -43, month: 2, expected: 28 },
            TestCase { calendar: CalendarKind::NoLeap, year: 2000, month: 2, expected: 28 },
            TestCase { calendar: CalendarKind::AllLeap, year: 2023, month: 2, expected: 29 },
            TestCase { calendar: CalendarKind::Day360, year: 2023, month: 1, expected: 30 },
            TestCase { calendar: CalendarKind::Day360, year: 2024, month: 2, expected: 30 },
            TestCase { calendar: CalendarKind::Standard, year: -469, month: 4, expected: 30 },
            TestCase { calendar: CalendarKind::Standard, year: 12_000, month: 12, expected: 31 },
        ];

        for case in &cases {
            assert_eq!(
                case.calendar.days_in_month(case.year, case.month),
                Ok(case.expected),
                "{} {}-{:02}",
                case.calendar,
                case.year,
                case.month
            );
        }
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(CalendarKind::Standard.days_in_month(2000, 0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(CalendarKind::Day360.days_in_month(2000, 13), Err(CalendarError::InvalidMonth(13)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("gregorian".parse::<CalendarKind>(), Ok(CalendarKind::Standard));
        assert_eq!("Proleptic_Gregorian".parse::<CalendarKind>(), Ok(CalendarKind::Standard));
        assert_eq!("365_day".parse::<CalendarKind>(), Ok(CalendarKind::NoLeap));
        assert_eq!("366_day".parse::<CalendarKind>(), Ok(CalendarKind::AllLeap));
        assert!(matches!("lunar".parse::<CalendarKind>(), Err(CalendarError::UnknownCalendar(_))));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for cal in CalendarKind::ALL {
            assert_eq!(cal.to_string().parse::<CalendarKind>(), Ok(cal));
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&CalendarKind::Day360).unwrap();
        assert_eq!(json, r#""360_day""#);
        let parsed: CalendarKind = serde_json::from_str(r#""julian""#).unwrap();
        assert_eq!(parsed, CalendarKind::Julian);
        assert!(serde_json::from_str::<CalendarKind>(r#""mayan""#).is_err());
    }
}
