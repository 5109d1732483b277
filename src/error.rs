use crate::calendar::CalendarKind;
use crate::prelude::*;

/// Error raised when date/time components are invalid under a calendar rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    #[error("Invalid day {day} for month {year}-{month:02} in the {calendar} calendar")]
    InvalidDay {
        year:     i64,
        month:    u8,
        day:      u8,
        calendar: CalendarKind,
    },

    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    #[error("Invalid microsecond: {0} (must be 0-999999)")]
    InvalidMicrosecond(u32),

    /// Native timestamps may carry nanoseconds; these are never truncated.
    #[error("Sub-microsecond precision is not representable: {0}ns")]
    SubMicrosecond(u32),

    #[error("Unknown calendar: {0:?}")]
    UnknownCalendar(String),
}

/// Error raised by the display-year mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum YearError {
    /// Zero and negative numerals are never valid; BC-ness comes from the suffix.
    #[error("Year must be a positive number, got {0}")]
    NotPositive(i64),

    #[error("Year {0} does not fit the astronomical year range")]
    Overflow(u64),
}

/// The operation during which a conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stage {
    #[display(fmt = "decode")]
    Decode,
    #[display(fmt = "encode")]
    Encode,
    #[display(fmt = "parse")]
    Parse,
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Input text matches none of the accepted patterns.
    #[error("unrecognized format: {0}")]
    Format(String),

    #[error(transparent)]
    YearRange(#[from] YearError),

    #[error(transparent)]
    CalendarValidation(#[from] CalendarError),

    /// The value is not one of the recognized date/time shapes at all.
    #[error("unsupported value type: {0}")]
    TypeMismatch(&'static str),

    /// A native bounded timestamp carried a year outside 1-9999.
    #[error("native timestamp year {0} is outside 1-9999")]
    OutOfBoundsNative(i32),
}

impl ErrorKind {
    /// Stable reason code, suitable for form-field error codes.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "invalid_format",
            Self::YearRange(_) => "invalid_year",
            Self::CalendarValidation(_) => "invalid_date",
            Self::TypeMismatch(_) => "type_mismatch",
            Self::OutOfBoundsNative(_) => "native_out_of_bounds",
        }
    }
}

/// A failed conversion, carrying the offending raw input and the stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} of {input:?} failed: {kind}")]
pub struct ConvertError {
    stage: Stage,
    input: String,
    #[source]
    kind:  ErrorKind,
}

impl ConvertError {
    /// Wraps a failure kind with the stage and the raw input it came from
    pub fn new(stage: Stage, input: impl Into<String>, kind: impl Into<ErrorKind>) -> Self {
        Self {
            stage,
            input: input.into(),
            kind: kind.into(),
        }
    }

    /// Returns the stage that failed
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the raw input as it was presented
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the failure kind
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Shorthand for `self.kind().code()`
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}
