//! Age calculation from free-form birth date strings.

use chrono::{Datelike, NaiveDate};

use super::patterns::{COMPACT_YYMMDD, DATE_DELIMITER};

/// Age in full years on `today`, or 0 if `date_of_birth` cannot be parsed.
///
/// Accepted encodings are `DD.MM.YYYY`, `DD/MM/YYYY`, `DD-MM-YYYY` and
/// six-digit `YYMMDD`. Birth dates after `today` give 0.
pub fn compute_age(date_of_birth: &str, today: NaiveDate) -> u32 {
    parse_birth_date(date_of_birth, today)
        .map(|birth| age_on(birth, today))
        .unwrap_or(0)
}

/// Parse a birth date. Two-digit years are expanded relative to `today`.
pub fn parse_birth_date(date_of_birth: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = date_of_birth.trim();

    if DATE_DELIMITER.is_match(input) {
        parse_delimited(input, today)
    } else if COMPACT_YYMMDD.is_match(input) {
        parse_compact(input, today)
    } else {
        None
    }
}

/// Full calendar years between `birth` and `today`, never negative.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

fn parse_delimited(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = DATE_DELIMITER.replace_all(input, "/");
    let parts: Vec<&str> = normalized.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = positive(day)?;
    let month = positive(month)?;
    let year = if year.len() <= 2 {
        expand_two_digit_year(positive(year)?, today)
    } else {
        positive(year)?
    };

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn parse_compact(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let year: u32 = input.get(0..2)?.parse().ok()?;
    let month: u32 = input.get(2..4)?.parse().ok()?;
    let day: u32 = input.get(4..6)?.parse().ok()?;

    let year = i32::try_from(expand_two_digit_year(year, today)).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YY` above the current two-digit year is the 1900s, otherwise the 2000s.
fn expand_two_digit_year(year: u32, today: NaiveDate) -> u32 {
    let cutoff = today.year().rem_euclid(100) as u32;
    if year > cutoff {
        1900 + year
    } else {
        2000 + year
    }
}

fn positive(part: &str) -> Option<u32> {
    part.parse::<u32>().ok().filter(|&n| n > 0)
}
