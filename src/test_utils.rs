//! Shared constructors for unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{CalendarKind, ExtendedDateTime, TimeOfDay};

/// Standard-calendar value with a full time of day
pub fn at(year: i64, month: u8, day: u8, hour: u8, minute: u8, second: u8, microsecond: u32) -> ExtendedDateTime {
    let time = TimeOfDay::new(hour, minute, second, microsecond).expect("valid test time");
    ExtendedDateTime::new(CalendarKind::Standard, year, month, day, time).expect("valid test date")
}

/// Standard-calendar value at midnight
pub fn ymd(year: i64, month: u8, day: u8) -> ExtendedDateTime {
    at(year, month, day, 0, 0, 0, 0)
}

/// Native timestamp with whole seconds
pub fn native(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .expect("valid test timestamp")
}
