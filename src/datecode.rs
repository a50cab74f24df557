//! Two-digit-year disambiguation for the six-digit `YYMMDD` codes embedded
//! in JRDB archive filenames. The pivot is fixed at 50: `50..=99` are
//! 1900s, `00..=49` are 2000s.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateCodeError {
    #[error("'{0}' is not a valid two-digit year fragment")]
    InvalidYearFragment(String),
}

/// Map a two-digit year fragment to a four-digit calendar year.
///
/// `full_year(49) == 2049`, `full_year(50) == 1950`. Values outside
/// `[0, 99]` are rejected rather than wrapped.
pub fn full_year(two_digit: u32) -> Result<u32, DateCodeError> {
    if two_digit > 99 {
        return Err(DateCodeError::InvalidYearFragment(two_digit.to_string()));
    }
    if two_digit >= 50 {
        Ok(1900 + two_digit)
    } else {
        Ok(2000 + two_digit)
    }
}

/// Parse the leading two characters of a code as a year fragment.
pub fn year_of(code: &str) -> Result<u32, DateCodeError> {
    let fragment = code
        .get(..2)
        .ok_or_else(|| DateCodeError::InvalidYearFragment(code.to_string()))?;
    let two_digit: u32 = fragment
        .parse()
        .map_err(|_| DateCodeError::InvalidYearFragment(fragment.to_string()))?;
    full_year(two_digit)
}

/// Expand a `YYMMDD` code to an 8-character `YYYYMMDD` string whose
/// lexicographic order matches chronological order.
pub fn sort_key(code: &str) -> Result<String, DateCodeError> {
    let year = year_of(code)?;
    Ok(format!("{}{}", year, &code[2..]))
}
