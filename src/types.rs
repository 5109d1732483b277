use crate::calendar::CalendarKind;
use crate::consts::{
    FRACTION_SEPARATOR, MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MICROSECOND_DIGITS,
    TIME_SEPARATOR,
};
use crate::error::CalendarError;
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year, month and calendar
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the calendar's month length
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: i64, month: Month, calendar: CalendarKind) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDay {
            year,
            month: month.get(),
            day: value,
            calendar,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > calendar.days_in_month(year, month.get())? {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock time of day with microsecond precision. No leap seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour:        u8,
    minute:      u8,
    second:      u8,
    microsecond: u32,
}

impl TimeOfDay {
    /// 00:00:00, the time given to date-only values
    pub const MIDNIGHT: Self = Self {
        hour:        0,
        minute:      0,
        second:      0,
        microsecond: 0,
    };

    /// # Errors
    /// Returns `CalendarError::InvalidTime` or `CalendarError::InvalidMicrosecond`
    /// when a component is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8, microsecond: u32) -> Result<Self, CalendarError> {
        if hour > MAX_HOUR || minute > MAX_MINUTE || second > MAX_SECOND {
            return Err(CalendarError::InvalidTime { hour, minute, second });
        }
        if microsecond > MAX_MICROSECOND {
            return Err(CalendarError::InvalidMicrosecond(microsecond));
        }
        Ok(Self {
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Returns the hour (0-23)
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59)
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0-59)
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Returns the microsecond (0-999999)
    pub const fn microsecond(self) -> u32 {
        self.microsecond
    }
}

/// `HH:MM:SS`, followed by `.ffffff` only when the microsecond is non-zero.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{TIME_SEPARATOR}{:02}{TIME_SEPARATOR}{:02}",
            self.hour, self.minute, self.second
        )?;
        if self.microsecond != 0 {
            write!(
                f,
                "{FRACTION_SEPARATOR}{:0width$}",
                self.microsecond,
                width = MICROSECOND_DIGITS
            )?;
        }
        Ok(())
    }
}
