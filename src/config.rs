use serde::{Deserialize, Serialize};

use crate::calendar::CalendarKind;
use crate::prelude::*;

/// What to do with a UTC offset attached to an incoming timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezonePolicy {
    /// Keep the local wall-clock fields and discard the offset.
    #[default]
    #[display(fmt = "drop")]
    Drop,
    /// Refuse zone-aware input.
    #[display(fmt = "reject")]
    Reject,
}

/// Settings for an [`ExtendedDateConverter`](crate::ExtendedDateConverter).
///
/// Deserializes from a partial document; missing keys take their defaults:
///
/// ```
/// # use extended_dates::{CalendarKind, ConverterConfig, TimezonePolicy};
/// let config: ConverterConfig = serde_json::from_str(r#"{ "calendar": "julian" }"#).unwrap();
/// assert_eq!(config.calendar, CalendarKind::Julian);
/// assert_eq!(config.timezone, TimezonePolicy::Drop);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Calendar applied to values decoded from storage or parsed from input
    pub calendar: CalendarKind,
    /// Handling of zone-aware timestamps
    pub timezone: TimezonePolicy,
}

impl ConverterConfig {
    pub const fn new() -> Self {
        Self {
            calendar: CalendarKind::Standard,
            timezone: TimezonePolicy::Drop,
        }
    }

    #[must_use]
    pub const fn with_calendar(mut self, calendar: CalendarKind) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub const fn with_timezone(mut self, timezone: TimezonePolicy) -> Self {
        self.timezone = timezone;
        self
    }
}
