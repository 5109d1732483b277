//! Text grammars: the canonical stored form and the accepted input formats.
//!
//! Both grammars carry the year as a positive numeral of at least four
//! digits; era is conveyed only by a trailing `BC` marker.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::calendar::CalendarKind;
use crate::consts::{BC_MARKER, MICROSECOND_DIGITS};
use crate::datetime::ExtendedDateTime;
use crate::error::{ConvertError, ErrorKind, Stage};
use crate::types::TimeOfDay;
use crate::year::{DisplayYear, Era};

/// `YYYY-MM-DD HH:MM:SS[.f…][ BC]`, as written by the encoder. The fraction
/// length is checked after matching so over-precise input gets a clear error.
#[allow(clippy::expect_used)]
static STORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<year>[0-9]{4,})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})\s+(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})(?:\.(?P<fraction>[0-9]+))?(?:\s+(?P<bc>BC))?$",
    )
    .expect("stored timestamp pattern is valid")
});

/// One accepted user input format.
struct InputFormat {
    name:    &'static str,
    pattern: Regex,
}

impl InputFormat {
    #[allow(clippy::expect_used)]
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("input format pattern is valid"),
        }
    }
}

/// Accepted input formats, most specific first.
static INPUT_FORMATS: Lazy<[InputFormat; 4]> = Lazy::new(|| {
    [
        InputFormat::new(
            "YYYY-MM-DD HH:MM:SS.ffffff",
            r"^(?P<year>[0-9]{4,})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})\s+(?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{1,2}):(?P<second>[0-9]{1,2})\.(?P<fraction>[0-9]{1,6})$",
        ),
        InputFormat::new(
            "YYYY-MM-DD HH:MM:SS",
            r"^(?P<year>[0-9]{4,})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})\s+(?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{1,2}):(?P<second>[0-9]{1,2})$",
        ),
        InputFormat::new(
            "YYYY-MM-DD HH:MM",
            r"^(?P<year>[0-9]{4,})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})\s+(?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{1,2})$",
        ),
        InputFormat::new("YYYY-MM-DD", r"^(?P<year>[0-9]{4,})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})$"),
    ]
});

const FORMAT_HINT: &str = "expected YYYY-MM-DD[ HH:MM[:SS[.ffffff]]] with an optional BC suffix";

/// Raw numeric components read from text, before any validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    year:        u64,
    month:       u8,
    day:         u8,
    hour:        u8,
    minute:      u8,
    second:      u8,
    microsecond: u32,
}

impl Fields {
    fn from_captures(caps: &Captures<'_>) -> Result<Self, ErrorKind> {
        let year = caps["year"]
            .parse::<u64>()
            .map_err(|_| ErrorKind::Format(format!("year numeral {} is too large", &caps["year"])))?;
        Ok(Self {
            year,
            month: small(caps, "month")?,
            day: small(caps, "day")?,
            hour: small(caps, "hour")?,
            minute: small(caps, "minute")?,
            second: small(caps, "second")?,
            microsecond: caps
                .name("fraction")
                .map_or(Ok(0), |m| parse_fraction(m.as_str()))?,
        })
    }

    fn build(self, era: Era, calendar: CalendarKind) -> Result<ExtendedDateTime, ErrorKind> {
        let year = DisplayYear::from_numeral(self.year, era)?;
        let time = TimeOfDay::new(self.hour, self.minute, self.second, self.microsecond)?;
        ExtendedDateTime::from_display(calendar, year, self.month, self.day, time)
    }
}

/// Reads an optional group of at most two digits; absent groups are zero.
fn small(caps: &Captures<'_>, name: &str) -> Result<u8, ErrorKind> {
    caps.name(name).map_or(Ok(0), |m| {
        m.as_str()
            .parse()
            .map_err(|_| ErrorKind::Format(format!("{name} field {:?} is not a number", m.as_str())))
    })
}

/// Right-pads a fractional second to microseconds (`.5` is 500000).
fn parse_fraction(digits: &str) -> Result<u32, ErrorKind> {
    if digits.len() > MICROSECOND_DIGITS {
        return Err(ErrorKind::Format(format!(
            "fractional second .{digits} exceeds microsecond precision"
        )));
    }
    format!("{digits:0<width$}", width = MICROSECOND_DIGITS)
        .parse()
        .map_err(|_| ErrorKind::Format(format!("invalid fractional second .{digits}")))
}

/// Splits a trailing, whitespace-separated, case-insensitive `bc` marker.
fn strip_era(text: &str) -> (&str, Era) {
    let Some(split) = text.len().checked_sub(BC_MARKER.len()) else {
        return (text, Era::Ad);
    };
    match (text.get(..split), text.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(BC_MARKER) && head.ends_with(char::is_whitespace) => {
            (head.trim_end(), Era::Bc)
        }
        _ => (text, Era::Ad),
    }
}

/// Parses free-form human input into a value under `calendar`.
///
/// Formats are tried in order and the first match wins. The year must be
/// written as a positive numeral; BC-ness comes only from the suffix.
///
/// # Errors
/// `Format` if no format matches, `YearRange` for a zero year, and
/// `CalendarValidation` if the components do not form a valid date/time.
pub fn parse_input(text: &str, calendar: CalendarKind) -> Result<ExtendedDateTime, ConvertError> {
    let fail = |kind: ErrorKind| ConvertError::new(Stage::Parse, text, kind);
    let (body, era) = strip_era(text.trim());

    let caps = INPUT_FORMATS
        .iter()
        .find_map(|format| {
            let caps = format.pattern.captures(body);
            trace!(format = format.name, matched = caps.is_some(), "trying input format");
            caps
        })
        .ok_or_else(|| fail(ErrorKind::Format(FORMAT_HINT.to_owned())))?;

    Fields::from_captures(&caps)
        .and_then(|fields| fields.build(era, calendar))
        .map_err(fail)
}

/// Parses the canonical stored form.
///
/// Returns `None` when `text` is not in the stored grammar at all, so the
/// caller can fall back to other timestamp syntaxes.
pub(crate) fn parse_stored(text: &str, calendar: CalendarKind) -> Option<Result<ExtendedDateTime, ErrorKind>> {
    let caps = STORED.captures(text)?;
    let era = if caps.name("bc").is_some() { Era::Bc } else { Era::Ad };
    Some(Fields::from_captures(&caps).and_then(|fields| fields.build(era, calendar)))
}

/// Renders the canonical extended form, `YYYY-MM-DD HH:MM:SS[.ffffff][ BC]`.
///
/// Used for both storage and display, for in-range values too.
pub fn format_extended(value: &ExtendedDateTime) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalendarError, YearError};
    use crate::test_utils::{at, ymd};

    fn parse(text: &str) -> Result<ExtendedDateTime, ConvertError> {
        parse_input(text, CalendarKind::Standard)
    }

    #[test]
    fn test_parse_formats_in_order() {
        struct TestCase {
            input:    &'static str,
            expected: ExtendedDateTime,
        }

        let cases = [
            TestCase { input: "2023-10-26 12:30:15.5", expected: at(2023, 10, 26, 12, 30, 15, 500_000) },
            TestCase { input: "2023-10-26 12:30:15.000001", expected: at(2023, 10, 26, 12, 30, 15, 1) },
            TestCase { input: "2023-10-26 12:30:15", expected: at(2023, 10, 26, 12, 30, 15, 0) },
            TestCase { input: "2023-10-26 12:30", expected: at(2023, 10, 26, 12, 30, 0, 0) },
            TestCase { input: "2023-10-26", expected: ymd(2023, 10, 26) },
            TestCase { input: "2023-1-2 3:4:5", expected: at(2023, 1, 2, 3, 4, 5, 0) },
            TestCase { input: "  2023-10-26  ", expected: ymd(2023, 10, 26) },
            TestCase { input: "12000-01-01", expected: ymd(12_000, 1, 1) },
        ];

        for case in &cases {
            assert_eq!(parse(case.input).unwrap(), case.expected, "input {:?}", case.input);
        }
    }

    #[test]
    fn test_parse_bc_suffix() {
        struct TestCase {
            input:    &'static str,
            expected: ExtendedDateTime,
        }

        let cases = [
            TestCase { input: "0044-03-15 10:00:00 BC", expected: at(-43, 3, 15, 10, 0, 0, 0) },
            TestCase { input: "0044-03-15 10:00:00 bc", expected: at(-43, 3, 15, 10, 0, 0, 0) },
            TestCase { input: "0044-03-15 10:00 Bc", expected: at(-43, 3, 15, 10, 0, 0, 0) },
            TestCase { input: "0001-01-01 BC", expected: ymd(0, 1, 1) },
            TestCase { input: "0470-06-01\tBC  ", expected: ymd(-469, 6, 1) },
            TestCase { input: "0002-12-31 23:59:59.999999 BC", expected: at(-1, 12, 31, 23, 59, 59, 999_999) },
        ];

        for case in &cases {
            assert_eq!(parse(case.input).unwrap(), case.expected, "input {:?}", case.input);
        }
    }

    #[test]
    fn test_parse_rejects_year_zero() {
        for input in ["0000-01-01", "0000-01-01 BC", "0000-06-15 12:00:00 bc"] {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::YearRange(YearError::NotPositive(0)), "input {input:?}");
            assert_eq!(err.stage(), Stage::Parse);
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for input in [
            "not a date",
            "",
            "BC",
            "-0044-03-15",
            "44-03-15 BC",
            "2023-10-26BC",
            "2023/10/26",
            "2023-10-26T12:30:15",
            "2023-10-26 12:30:15.1234567",
            "2023-10-26 12:30:15 AD",
        ] {
            let err = parse(input).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::Format(_)), "input {input:?}: {err}");
        }
    }

    #[test]
    fn test_parse_validates_calendar() {
        let err = parse("2023-02-29").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::CalendarValidation(CalendarError::InvalidDay { day: 29, month: 2, .. })
        ));
        assert!(matches!(
            parse("2023-13-01").unwrap_err().kind(),
            ErrorKind::CalendarValidation(CalendarError::InvalidMonth(13))
        ));
        assert!(matches!(
            parse("2023-01-01 24:00").unwrap_err().kind(),
            ErrorKind::CalendarValidation(CalendarError::InvalidTime { .. })
        ));
        // 1 BC is a leap year, 2 BC is not
        assert!(parse("0001-02-29 BC").is_ok());
        assert!(parse("0002-02-29 BC").is_err());

        assert!(parse_input("1900-02-29", CalendarKind::Julian).is_ok());
        assert!(parse_input("2023-02-30", CalendarKind::Day360).is_ok());
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        let cal = CalendarKind::Standard;
        for input in [
            "2023-10-26 12:\u{0663}0",
            "2023-10-26 1\u{0662}:30:15",
            "2023-1\u{0660}-26",
            "2023-10-\u{0662}6",
            "\u{0662}023-10-26",
            "2023-10-26 12:30:15.\u{0665}",
            "0044-03-15 \u{0661}\u{0660}:00 BC",
        ] {
            let err = parse_input(input, cal).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::Format(_)), "input {input:?}: {err}");
        }

        assert_eq!(parse_stored("0044-03-15 \u{0661}\u{0660}:00:00 BC", cal), None);
        assert_eq!(parse_stored("0044-0\u{0663}-15 10:00:00 BC", cal), None);
        assert_eq!(parse_stored("\u{0660}\u{0660}44-03-15 10:00:00 BC", cal), None);
        assert_eq!(parse_stored("0044-03-15 10:00:00.\u{0665} BC", cal), None);
    }

    #[test]
    fn test_strip_era() {
        assert_eq!(strip_era("0044-03-15 BC"), ("0044-03-15", Era::Bc));
        assert_eq!(strip_era("0044-03-15 bC"), ("0044-03-15", Era::Bc));
        assert_eq!(strip_era("0044-03-15BC"), ("0044-03-15BC", Era::Ad));
        assert_eq!(strip_era("bc"), ("bc", Era::Ad));
        assert_eq!(strip_era("c"), ("c", Era::Ad));
        assert_eq!(strip_era("2023 é"), ("2023 é", Era::Ad));
    }

    #[test]
    fn test_parse_stored() {
        let cal = CalendarKind::Standard;
        assert_eq!(parse_stored("0044-03-15 10:00:00 BC", cal), Some(Ok(at(-43, 3, 15, 10, 0, 0, 0))));
        assert_eq!(parse_stored("0044-03-15 10:00:00.25 bc", cal), Some(Ok(at(-43, 3, 15, 10, 0, 0, 250_000))));
        assert_eq!(parse_stored("12000-01-01 00:00:00", cal), Some(Ok(ymd(12_000, 1, 1))));
        assert_eq!(
            parse_stored("0000-01-01 00:00:00 BC", cal),
            Some(Err(ErrorKind::YearRange(YearError::NotPositive(0))))
        );
        assert!(matches!(
            parse_stored("0044-03-15 10:00:00.1234567 BC", cal),
            Some(Err(ErrorKind::Format(_)))
        ));
        assert_eq!(parse_stored("2023-10-26T12:30:15", cal), None);
        assert_eq!(parse_stored("0044-03-15 BC", cal), None);
    }

    #[test]
    fn test_format_extended() {
        assert_eq!(format_extended(&at(-43, 3, 15, 10, 0, 0, 0)), "0044-03-15 10:00:00 BC");
        assert_eq!(format_extended(&ymd(2023, 10, 26)), "2023-10-26 00:00:00");
    }
}
