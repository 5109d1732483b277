use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarKind;
use crate::consts::{DATE_SEPARATOR, MAX_MICROSECOND, MAX_NATIVE_YEAR, MIN_NATIVE_YEAR, NANOS_PER_MICRO};
use crate::error::{CalendarError, ConvertError, ErrorKind};
use crate::format;
use crate::types::{Day, Month, TimeOfDay};
use crate::year::{DisplayYear, Era};

/// A calendar date/time with an unbounded astronomical year.
///
/// Year numbering is astronomical: `1` is 1 AD, `0` is 1 BC, `-1` is 2 BC.
/// The day of month is validated against the leap rule of `calendar` at
/// construction; values are immutable afterwards. Time zones are not
/// carried.
///
/// Ordering is chronological for values sharing a calendar; the calendar
/// only breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedDateTime {
    year:     i64,
    month:    Month,
    day:      Day,
    time:     TimeOfDay,
    calendar: CalendarKind,
}

impl ExtendedDateTime {
    /// Creates a value from raw components.
    ///
    /// # Errors
    /// Returns `CalendarError` if the month, day or time is invalid under `calendar`.
    pub fn new(
        calendar: CalendarKind,
        year: i64,
        month: u8,
        day: u8,
        time: TimeOfDay,
    ) -> Result<Self, CalendarError> {
        let month = Month::new(month)?;
        let day = Day::new(day, year, month, calendar)?;
        Ok(Self {
            year,
            month,
            day,
            time,
            calendar,
        })
    }

    /// Midnight on the given date.
    ///
    /// # Errors
    /// Returns `CalendarError` if the date is invalid under `calendar`.
    pub fn from_ymd(calendar: CalendarKind, year: i64, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::new(calendar, year, month, day, TimeOfDay::MIDNIGHT)
    }

    /// Creates a value from a display year (positive numeral plus era).
    ///
    /// The caller attaches stage and raw input to the returned kind.
    pub(crate) fn from_display(
        calendar: CalendarKind,
        year: DisplayYear,
        month: u8,
        day: u8,
        time: TimeOfDay,
    ) -> Result<Self, ErrorKind> {
        let year = year.to_astronomical()?;
        Ok(Self::new(calendar, year, month, day, time)?)
    }

    /// Astronomical year (0 = 1 BC)
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Returns the month value as u8
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of the month as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the hour (0-23)
    pub const fn hour(&self) -> u8 {
        self.time.hour()
    }

    /// Returns the minute (0-59)
    pub const fn minute(&self) -> u8 {
        self.time.minute()
    }

    /// Returns the second (0-59)
    pub const fn second(&self) -> u8 {
        self.time.second()
    }

    /// Returns the microsecond (0-999999)
    pub const fn microsecond(&self) -> u32 {
        self.time.microsecond()
    }

    /// Returns the time-of-day component
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Returns the calendar whose leap rule validated this value
    pub const fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    /// The year as a human writes it.
    pub const fn display_year(&self) -> DisplayYear {
        DisplayYear::from_astronomical(self.year)
    }

    /// Returns the era of the display year
    pub const fn era(&self) -> Era {
        self.display_year().era()
    }

    /// Whether the year lies in the 1-9999 AD range of native timestamps.
    pub const fn is_native_range(&self) -> bool {
        self.year >= MIN_NATIVE_YEAR && self.year <= MAX_NATIVE_YEAR
    }

    /// Converts to a native timestamp when the year is in 1-9999 and the
    /// calendar follows the Gregorian leap rule.
    pub fn to_native(&self) -> Option<NaiveDateTime> {
        if !self.is_native_range() || !self.calendar.is_native_compatible() {
            return None;
        }
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, u32::from(self.month()), u32::from(self.day()))?.and_hms_micro_opt(
            u32::from(self.hour()),
            u32::from(self.minute()),
            u32::from(self.second()),
            self.microsecond(),
        )
    }

    /// Field-by-field copy of a native timestamp into `calendar`.
    ///
    /// The native year range is not checked here; see
    /// [`ExtendedDateConverter::decode`](crate::ExtendedDateConverter::decode).
    ///
    /// # Errors
    /// Returns `CalendarError::SubMicrosecond` for nanosecond precision or
    /// leap-second representations, or a validation error if the date does
    /// not exist in `calendar`.
    // chrono keeps its components in narrow ranges, so the casts are lossless
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_native(native: &NaiveDateTime, calendar: CalendarKind) -> Result<Self, CalendarError> {
        let nanos = native.nanosecond();
        if nanos % NANOS_PER_MICRO != 0 || nanos / NANOS_PER_MICRO > MAX_MICROSECOND {
            return Err(CalendarError::SubMicrosecond(nanos));
        }
        let time = TimeOfDay::new(
            native.hour() as u8,
            native.minute() as u8,
            native.second() as u8,
            nanos / NANOS_PER_MICRO,
        )?;
        Self::new(
            calendar,
            i64::from(native.year()),
            native.month() as u8,
            native.day() as u8,
            time,
        )
    }
}

impl TryFrom<NaiveDateTime> for ExtendedDateTime {
    type Error = CalendarError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_native(&value, CalendarKind::Standard)
    }
}

/// The canonical extended form: `YYYY-MM-DD HH:MM:SS[.ffffff][ BC]`.
impl fmt::Display for ExtendedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.display_year();
        write!(
            f,
            "{year}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02} {}{}",
            self.month(),
            self.day(),
            self.time,
            year.suffix()
        )
    }
}

/// Parses human input under the standard calendar.
impl FromStr for ExtendedDateTime {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        format::parse_input(s, CalendarKind::Standard)
    }
}

impl Serialize for ExtendedDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExtendedDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
