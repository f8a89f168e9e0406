//! Value normalizers shared by the export transforms
//!
//! Stateless helpers; none of them fail. A value that cannot be normalized
//! comes back as `None` and the field is left out of the document.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use valglister_common::Gender;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Collapse every run of two or more whitespace characters into one space
///
/// Single whitespace characters are left as they are, so cleaning an already
/// clean name returns it unchanged.
pub fn clean_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name, " ").into_owned()
}

/// Translate a gender code as used across the exports
///
/// Known codes are `M`, `K`, `Mann` and `Kvinne`. Anything else yields
/// `None`.
pub fn gender(code: &str) -> Option<Gender> {
    match code.trim() {
        "M" | "Mann" => Some(Gender::Male),
        "K" | "Kvinne" => Some(Gender::Female),
        _ => None,
    }
}

/// Parse a year such as `1961`
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Parse a day-first birth date (`DD.MM.YYYY`)
///
/// Some exports only carry a two-digit year (`01.02.61`). Those are read as
/// `20YY`, which is what the export tooling itself produced; use
/// [`correct_century`] with the separately published birth year to repair
/// them.
pub fn parse_date_born(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let mut parts = raw.split('.');

    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        debug!(value = raw, "Birth date has too many components");
        return None;
    }

    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => {
            debug!(value = raw, "Birth date has an unexpected year width");
            return None;
        },
    };

    let date = NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?);
    if date.is_none() {
        debug!(value = raw, "Birth date is not a calendar date");
    }
    date
}

/// Replace the year of `date` with `year_born` when the two disagree
///
/// Returns `None` only when the corrected date does not exist (29 February
/// moved into a non-leap year).
pub fn correct_century(date: NaiveDate, year_born: i32) -> Option<NaiveDate> {
    if date.year() == year_born {
        return Some(date);
    }
    date.with_year(year_born)
}

fn numeric(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())).then_some(raw)
}

/// Normalize a municipality code to four digits (`301` -> `0301`)
///
/// Non-numeric codes are passed through trimmed.
pub fn municipality_code(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match numeric(raw) {
        Some(code) if code.len() <= 4 => Some(format!("{:0>4}", code)),
        Some(code) => Some(code[..4].to_string()),
        None => Some(raw.to_string()),
    }
}

/// Normalize a county code to two digits
///
/// One- and two-digit codes are zero padded (`3` -> `03`). Wider codes are
/// finer-grained region numbers and are truncated to their county prefix
/// (`0300` -> `03`, `301` -> `03`).
pub fn county_code(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match numeric(raw) {
        Some(code) if code.len() <= 2 => Some(format!("{:0>2}", code)),
        Some(_) => county_from_municipality(raw),
        None => Some(raw.to_string()),
    }
}

/// Derive the county code from a municipality code (`0301` -> `03`)
pub fn county_from_municipality(municipality: &str) -> Option<String> {
    let code = municipality_code(municipality)?;
    numeric(&code).map(|digits| digits[..2].to_string())
}
