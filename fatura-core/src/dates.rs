//! Statement date parsing.
//!
//! Due dates are full `dd/mm/yy`; transaction rows usually carry only
//! `dd / mmm` with a Portuguese month abbreviation, so the caller supplies
//! the year (taken from the due date).

use chrono::NaiveDate;

use crate::error::ScrapeError;

/// Lowercase Portuguese month abbreviations, January first.
pub const MONTH_ABBREVS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Month number (1..=12) for an abbreviation. Case-sensitive.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    MONTH_ABBREVS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

/// Parse `dd/mm/yy` (e.g. "24/04/21") as a date in the 2000s.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, ScrapeError> {
    let s = s.trim();
    let parts: Vec<_> = s.split('/').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ScrapeError::parse("dd/mm/yy date", s));
    }

    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| ScrapeError::parse("dd/mm/yy date", s))?;
    let (day, month, yy) = (numbers[0], numbers[1], numbers[2]);
    if yy > 99 {
        return Err(ScrapeError::parse("dd/mm/yy date", s));
    }

    NaiveDate::from_ymd_opt(2000 + yy as i32, month, day)
        .ok_or_else(|| ScrapeError::parse("dd/mm/yy date", s))
}

/// Parse `"<day> / <abbrev>"` (e.g. "24 / abr") using the supplied year.
///
/// An unknown abbreviation is an error rather than a silent month 0.
pub fn parse_day_month_name(s: &str, year: i32) -> Result<NaiveDate, ScrapeError> {
    let s = s.trim();
    let (day, abbrev) = s
        .split_once('/')
        .ok_or_else(|| ScrapeError::parse("day / month date", s))?;

    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| ScrapeError::parse("day / month date", s))?;
    let month = month_from_abbrev(abbrev.trim())
        .ok_or_else(|| ScrapeError::parse("month abbreviation", abbrev.trim()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ScrapeError::parse("day / month date", s))
}
