//! The conversion engine between stored values, extended values and text.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, trace, warn};

use crate::calendar::CalendarKind;
use crate::config::{ConverterConfig, TimezonePolicy};
use crate::consts::{MAX_NATIVE_YEAR, MIN_NATIVE_YEAR};
use crate::datetime::ExtendedDateTime;
use crate::error::{ConvertError, ErrorKind, Stage};
use crate::format::{self, format_extended};
use crate::prelude::*;

/// Naive ISO-like layouts accepted from storage, tried in order.
const ISO_NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts not covered by RFC 3339.
const ISO_ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%#z"];

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A value as the storage layer hands it over.
///
/// Storage columns may carry more shapes than the converter understands;
/// the unsupported ones are rejected with a type mismatch instead of being
/// coerced.
#[derive(Debug, Clone, PartialEq, From)]
pub enum StoredValue {
    /// Bounded native timestamp (years 1-9999)
    Timestamp(NaiveDateTime),
    /// Native timestamp with a UTC offset
    TimestampTz(DateTime<FixedOffset>),
    /// Native calendar date, read as midnight
    Date(NaiveDate),
    /// Text previously written by [`ExtendedDateConverter::encode`], or an ISO timestamp
    Text(String),
    /// An already converted value
    Extended(ExtendedDateTime),
    Integer(i64),
    Boolean(bool),
    Bytes(Vec<u8>),
}

impl StoredValue {
    /// Short name of the variant, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Timestamp(_) => "timestamp",
            Self::TimestampTz(_) => "timestamp with time zone",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
            Self::Extended(_) => "extended date/time",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for StoredValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::TimestampTz(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Extended(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "{v:?}"),
        }
    }
}

/// What the converter hands back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Encoded {
    /// In-range value, stored with the engine's native timestamp type
    Timestamp(NaiveDateTime),
    /// Out-of-range value in the canonical extended text form, stored verbatim
    Text(String),
}

impl Encoded {
    /// Returns the text form, if this value was encoded as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Timestamp(_) => None,
        }
    }

    /// Returns the native timestamp, if this value was encoded natively
    pub const fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::Timestamp(native) => Some(native),
            Self::Text(_) => None,
        }
    }
}

impl From<Encoded> for StoredValue {
    fn from(encoded: Encoded) -> Self {
        match encoded {
            Encoded::Timestamp(native) => Self::Timestamp(native),
            Encoded::Text(text) => Self::Text(text),
        }
    }
}

/// An ISO-like timestamp recognised by chrono.
enum IsoTimestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

fn parse_iso(text: &str) -> Option<IsoTimestamp> {
    if let Some(native) = ISO_NAIVE_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Some(IsoTimestamp::Naive(native));
    }
    if let Some(zoned) = DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        ISO_ZONED_FORMATS
            .iter()
            .find_map(|layout| DateTime::parse_from_str(text, layout).ok())
    }) {
        return Some(IsoTimestamp::Zoned(zoned));
    }
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
        .ok()
        .map(|date| IsoTimestamp::Naive(date.and_time(NaiveTime::MIN)))
}

fn in_native_range(year: i32) -> bool {
    (MIN_NATIVE_YEAR..=MAX_NATIVE_YEAR).contains(&i64::from(year))
}

/// Translates between stored values, [`ExtendedDateTime`] and display text.
///
/// The converter holds only its configuration; every operation is a pure
/// function of its input, so one instance can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExtendedDateConverter {
    config: ConverterConfig,
}

impl ExtendedDateConverter {
    /// Creates a converter with the given configuration
    pub const fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in effect
    pub const fn config(&self) -> ConverterConfig {
        self.config
    }

    /// Calendar applied to decoded and parsed values
    pub const fn calendar(&self) -> CalendarKind {
        self.config.calendar
    }

    /// Converts a value read from storage.
    ///
    /// Native timestamps are copied field by field, text in the canonical
    /// form goes through the year mapping, and other text is tried as an
    /// ISO-like timestamp.
    ///
    /// # Errors
    /// Returns a `ConvertError` with stage `Decode`; see [`ErrorKind`] for
    /// the failure kinds.
    pub fn decode(&self, stored: &StoredValue) -> Result<ExtendedDateTime, ConvertError> {
        debug!(shape = stored.type_name(), "decoding stored value");
        let fail = |kind: ErrorKind| ConvertError::new(Stage::Decode, stored.to_string(), kind);

        match stored {
            StoredValue::Extended(value) => Ok(*value),
            StoredValue::Timestamp(native) => self.lift_native(native).map_err(fail),
            StoredValue::Date(date) => self.lift_native(&date.and_time(NaiveTime::MIN)).map_err(fail),
            StoredValue::TimestampTz(zoned) => self
                .strip_zone(zoned)
                .and_then(|native| self.lift_native(&native))
                .map_err(fail),
            StoredValue::Text(text) => self.decode_text(text.trim()).map_err(fail),
            StoredValue::Integer(_) | StoredValue::Boolean(_) | StoredValue::Bytes(_) => {
                Err(fail(ErrorKind::TypeMismatch(stored.type_name())))
            }
        }
    }

    /// [`decode`](Self::decode) for nullable columns; `None` stays `None`.
    ///
    /// # Errors
    /// Same as [`decode`](Self::decode).
    pub fn decode_nullable(&self, stored: Option<&StoredValue>) -> Result<Option<ExtendedDateTime>, ConvertError> {
        stored.map(|value| self.decode(value)).transpose()
    }

    /// Converts a value for storage.
    ///
    /// Years 1-9999 in the standard calendar become native timestamps; all
    /// other values become canonical text, which storage keeps verbatim.
    pub fn encode(&self, value: &ExtendedDateTime) -> Encoded {
        if let Some(native) = value.to_native() {
            debug!(year = value.year(), "encoding as native timestamp");
            return Encoded::Timestamp(native);
        }
        debug!(year = value.year(), calendar = %value.calendar(), "encoding as extended text");
        Encoded::Text(format_extended(value))
    }

    /// [`encode`](Self::encode) for nullable columns.
    pub fn encode_nullable(&self, value: Option<&ExtendedDateTime>) -> Option<Encoded> {
        value.map(|value| self.encode(value))
    }

    /// Prepares an arbitrary stored-shape value for storage.
    ///
    /// Extended values are encoded, in-range native timestamps pass through
    /// untouched, and out-of-range native timestamps are lifted to extended
    /// values and written as text.
    ///
    /// # Errors
    /// Returns a `ConvertError` with stage `Encode` for shapes that are not
    /// date/times, and for native values that cannot be represented.
    pub fn encode_value(&self, stored: &StoredValue) -> Result<Encoded, ConvertError> {
        let fail = |kind: ErrorKind| ConvertError::new(Stage::Encode, stored.to_string(), kind);

        let native = match stored {
            StoredValue::Extended(value) => return Ok(self.encode(value)),
            StoredValue::Timestamp(native) => *native,
            StoredValue::Date(date) => date.and_time(NaiveTime::MIN),
            StoredValue::TimestampTz(zoned) => self.strip_zone(zoned).map_err(fail)?,
            StoredValue::Text(_) | StoredValue::Integer(_) | StoredValue::Boolean(_) | StoredValue::Bytes(_) => {
                return Err(fail(ErrorKind::TypeMismatch(stored.type_name())));
            }
        };

        if in_native_range(native.year()) {
            trace!(%native, "passing native timestamp through");
            return Ok(Encoded::Timestamp(native));
        }
        let value = ExtendedDateTime::from_native(&native, CalendarKind::Standard).map_err(|e| fail(e.into()))?;
        Ok(self.encode(&value))
    }

    /// Parses free-form text from an input widget.
    ///
    /// # Errors
    /// Returns a `ConvertError` with stage `Parse`.
    pub fn parse_user_input(&self, text: &str) -> Result<ExtendedDateTime, ConvertError> {
        format::parse_input(text, self.config.calendar)
    }

    /// [`parse_user_input`](Self::parse_user_input) treating blank text as no value.
    ///
    /// # Errors
    /// Same as [`parse_user_input`](Self::parse_user_input).
    pub fn parse_optional_input(&self, text: &str) -> Result<Option<ExtendedDateTime>, ConvertError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.parse_user_input(text).map(Some)
    }

    /// Renders a value for an input widget.
    ///
    /// Always the canonical extended text, even for in-range values, so
    /// every value is displayed the same way.
    pub fn format_for_display(&self, value: &ExtendedDateTime) -> String {
        format_extended(value)
    }

    fn lift_native(&self, native: &NaiveDateTime) -> Result<ExtendedDateTime, ErrorKind> {
        let year = native.year();
        if !in_native_range(year) {
            return Err(ErrorKind::OutOfBoundsNative(year));
        }
        Ok(ExtendedDateTime::from_native(native, self.config.calendar)?)
    }

    fn strip_zone(&self, zoned: &DateTime<FixedOffset>) -> Result<NaiveDateTime, ErrorKind> {
        match self.config.timezone {
            TimezonePolicy::Drop => {
                warn!(offset = %zoned.offset(), "dropping time zone from timestamp");
                Ok(zoned.naive_local())
            }
            TimezonePolicy::Reject => Err(ErrorKind::TypeMismatch("timestamp with time zone")),
        }
    }

    fn decode_text(&self, text: &str) -> Result<ExtendedDateTime, ErrorKind> {
        if let Some(result) = format::parse_stored(text, self.config.calendar) {
            trace!("matched canonical stored form");
            return result;
        }

        let native = match parse_iso(text) {
            Some(IsoTimestamp::Naive(native)) => native,
            Some(IsoTimestamp::Zoned(zoned)) => self.strip_zone(&zoned)?,
            None => return Err(ErrorKind::Format("unrecognized stored timestamp text".to_owned())),
        };
        trace!(%native, "matched ISO timestamp");
        if !in_native_range(native.year()) {
            return Err(ErrorKind::Format(format!(
                "ISO timestamp year {} is outside 1-9999",
                native.year()
            )));
        }
        Ok(ExtendedDateTime::from_native(&native, self.config.calendar)?)
    }
}
