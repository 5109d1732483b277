//! Mapping between human display years and astronomical years.
//!
//! Humans write `44 BC`; the value types store astronomical year `-43`.
//! Every conversion direction (storage decode and encode, input parsing and
//! display) goes through [`DisplayYear`], so there is exactly one place
//! where the off-by-one between the two numberings lives.

use std::fmt;

use crate::consts::{BC_SUFFIX, YEAR_WIDTH};
use crate::error::YearError;
use crate::prelude::*;

/// Era designation of a display year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum Era {
    #[default]
    #[display(fmt = "AD")]
    Ad,
    #[display(fmt = "BC")]
    Bc,
}

/// A year as a human writes it: a positive number plus an era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayYear {
    number: u64,
    era:    Era,
}

impl DisplayYear {
    /// Creates a display year from a signed numeral.
    ///
    /// # Errors
    /// Returns `YearError::NotPositive` for zero or negative numerals.
    pub const fn new(number: i64, era: Era) -> Result<Self, YearError> {
        if number <= 0 {
            return Err(YearError::NotPositive(number));
        }
        Ok(Self {
            number: number.unsigned_abs(),
            era,
        })
    }

    /// Creates a display year from an unsigned numeral, as read from text.
    ///
    /// # Errors
    /// Returns `YearError::NotPositive` if `number` is zero.
    pub const fn from_numeral(number: u64, era: Era) -> Result<Self, YearError> {
        if number == 0 {
            return Err(YearError::NotPositive(0));
        }
        Ok(Self { number, era })
    }

    /// Maps an astronomical year onto its display form. Total for every `i64`.
    pub const fn from_astronomical(year: i64) -> Self {
        if year <= 0 {
            // 0 -> 1 BC, -1 -> 2 BC
            Self {
                number: 1 + year.unsigned_abs(),
                era:    Era::Bc,
            }
        } else {
            Self {
                number: year.unsigned_abs(),
                era:    Era::Ad,
            }
        }
    }

    /// Maps this display year onto the astronomical numbering.
    ///
    /// # Errors
    /// Returns `YearError::Overflow` if the result does not fit in `i64`.
    pub fn to_astronomical(self) -> Result<i64, YearError> {
        let year = match self.era {
            Era::Ad => i64::try_from(self.number).ok(),
            // 1 BC -> 0, 470 BC -> -469
            Era::Bc => 0i64.checked_sub_unsigned(self.number - 1),
        };
        year.ok_or(YearError::Overflow(self.number))
    }

    /// Returns the positive numeral
    pub const fn number(self) -> u64 {
        self.number
    }

    /// Returns the era
    pub const fn era(self) -> Era {
        self.era
    }

    /// Returns the suffix appended after the date/time text (`" BC"` or nothing)
    pub const fn suffix(self) -> &'static str {
        match self.era {
            Era::Ad => "",
            Era::Bc => BC_SUFFIX,
        }
    }
}

/// Writes the zero-padded numeral only; the era suffix is the caller's to place.
impl fmt::Display for DisplayYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.number, width = YEAR_WIDTH)
    }
}

/// Converts a BC display year (`1` for 1 BC) to the astronomical year.
///
/// # Errors
/// Returns `YearError` if `year` is not positive or overflows.
pub fn bc_year_to_astronomical(year: i64) -> Result<i64, YearError> {
    DisplayYear::new(year, Era::Bc)?.to_astronomical()
}

/// Converts an astronomical year to its display numeral and era.
pub const fn astronomical_to_display(year: i64) -> (u64, Era) {
    let display = DisplayYear::from_astronomical(year);
    (display.number, display.era)
}
