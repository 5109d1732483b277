//! Calendar date/times outside 1–9999 AD, with a codec for storage layers
//! that only understand a bounded native timestamp.
//!
//! Values use astronomical year numbering (`0` is 1 BC, `-1` is 2 BC) and
//! one of several leap-year rules. Humans read and write them with an
//! explicit `BC` suffix:
//!
//! ```
//! use extended_dates::{Encoded, ExtendedDateConverter};
//!
//! let converter = ExtendedDateConverter::default();
//! let ides = converter.parse_user_input("0044-03-15 10:00:00 BC").unwrap();
//! assert_eq!(ides.year(), -43);
//!
//! // Out-of-range values are stored as text, in-range values natively
//! let stored = converter.encode(&ides);
//! assert_eq!(stored, Encoded::Text("0044-03-15 10:00:00 BC".to_owned()));
//! assert_eq!(converter.decode(&stored.into()).unwrap(), ides);
//! ```

mod calendar;
mod config;
mod consts;
mod convert;
mod datetime;
mod error;
mod format;
mod prelude;
mod types;
mod year;

#[cfg(test)]
mod test_utils;

pub use calendar::CalendarKind;
pub use config::{ConverterConfig, TimezonePolicy};
pub use consts::*;
pub use convert::{Encoded, ExtendedDateConverter, StoredValue};
pub use datetime::ExtendedDateTime;
pub use error::{CalendarError, ConvertError, ErrorKind, Stage, YearError};
pub use format::{format_extended, parse_input};
pub use types::{Day, Month, TimeOfDay};
pub use year::{DisplayYear, Era, astronomical_to_display, bc_year_to_astronomical};
