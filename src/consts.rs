/// Smallest year a native bounded timestamp may carry (1 AD)
pub const MIN_NATIVE_YEAR: i64 = 1;

/// Largest year a native bounded timestamp may carry (9999 AD)
pub const MAX_NATIVE_YEAR: i64 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Length of every month in the 360-day calendar
pub const DAYS_IN_MONTH_360: u8 = 30;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by the calendar's leap rule)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Largest hour of the day
pub const MAX_HOUR: u8 = 23;
/// Largest minute of the hour
pub const MAX_MINUTE: u8 = 59;
/// Largest second of the minute (leap seconds are not representable)
pub const MAX_SECOND: u8 = 59;
/// Largest microsecond of the second
pub const MAX_MICROSECOND: u32 = 999_999;

/// Digits written for the fractional second
pub const MICROSECOND_DIGITS: usize = 6;
/// Minimum zero-padded width of the year field
pub const YEAR_WIDTH: usize = 4;
/// Nanoseconds per microsecond, used when bridging native timestamps
pub(crate) const NANOS_PER_MICRO: u32 = 1_000;

/// Era suffix written after BC date/times
pub const BC_SUFFIX: &str = " BC";
/// Era marker recognised on input (compared case-insensitively)
pub const BC_MARKER: &str = "bc";

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Separator between seconds and the fractional second
pub const FRACTION_SEPARATOR: char = '.';
