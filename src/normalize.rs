// File: normalize.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DateParseError;

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap());

const IGNORED_WORDS: &[&str] = &[
    "updated",
    "on",
    "monday",
    "mon",
    "tuesday",
    "tue",
    "tues",
    "wednesday",
    "wed",
    "thursday",
    "thu",
    "thur",
    "thurs",
    "friday",
    "fri",
    "saturday",
    "sat",
    "sunday",
    "sun",
];

/// Turns storefront date text into `day/month/year` without zero padding.
///
/// Non-ASCII characters are blanked out first; App Store pages regularly
/// wrap the date in bidi marks or non-breaking spaces.
pub fn normalize_date(raw: &str) -> Result<String, DateParseError> {
    let date = parse_lenient(&strip_non_ascii(raw))?;
    Ok(format_date(date))
}

pub fn strip_non_ascii(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { ' ' })
        .collect()
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// A piece of date text once separators and noise words are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Month(u32),
    Number(&'a str),
}

pub fn parse_lenient(text: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some(date) = parse_iso(trimmed) {
        return Ok(date);
    }

    let unrecognized = || DateParseError::Unrecognized(trimmed.to_string());
    let cleaned = ORDINAL_SUFFIX.replace_all(trimmed, "$1");
    let words: Vec<&str> = cleaned
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '/' | '-'))
        .filter(|w| !w.is_empty())
        .filter(|w| !IGNORED_WORDS.contains(&w.to_lowercase().as_str()))
        .collect();

    if words.is_empty() {
        return Err(DateParseError::Empty);
    }

    let tokens = words
        .iter()
        .map(|w| classify(w))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(unrecognized)?;

    assemble(&tokens).ok_or_else(unrecognized)
}

fn classify(word: &str) -> Option<Token<'_>> {
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Token::Number(word));
    }
    let name = if word.eq_ignore_ascii_case("sept") {
        "sep"
    } else {
        word
    };
    name.parse::<Month>()
        .ok()
        .map(|m| Token::Month(m.number_from_month()))
}

/// Builds a date from exactly one day, one month and one year.
///
/// With a month name the remaining numbers are day and year in either
/// order. All-numeric dates are year-first when they lead with four
/// digits, otherwise month-first, falling back to day-first when the
/// leading number cannot be a month.
fn assemble(tokens: &[Token<'_>]) -> Option<NaiveDate> {
    let months: Vec<u32> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Month(m) => Some(*m),
            Token::Number(_) => None,
        })
        .collect();
    let numbers: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Number(n) => Some(*n),
            Token::Month(_) => None,
        })
        .collect();

    match (months.as_slice(), numbers.as_slice()) {
        ([month], [a, b]) => {
            let (day, year) = if a.len() == 4 { (b, a) } else { (a, b) };
            ymd(year, &month.to_string(), day)
        }
        ([], [a, b, c]) if a.len() == 4 => ymd(a, b, c),
        ([], [a, b, c]) => ymd(c, a, b).or_else(|| ymd(c, b, a)),
        _ => None,
    }
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    let year = match year.len() {
        4 => year.parse::<i32>().ok()?,
        2 => 2000 + year.parse::<i32>().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn parse_iso(text: &str) -> Option<NaiveDate> {
    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        dt.date_naive()
    } else if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        dt.date_naive()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        naive.date()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        naive.date()
    } else {
        return None;
    };
    // %Y accepts short years; leave those to the token rules.
    (date.year() >= 1000).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("March 3, 2021", "3/3/2021")]
    #[case("Mar 3, 2021", "3/3/2021")]
    #[case("3 Mar 2021", "3/3/2021")]
    #[case("December 25th, 2020", "25/12/2020")]
    #[case("Updated on Oct 1, 2024", "1/10/2024")]
    #[case("Tuesday, 9 January 2024", "9/1/2024")]
    #[case("Sept 12, 2023", "12/9/2023")]
    #[case("2021-03-03", "3/3/2021")]
    #[case("2021-03-03T10:00:00Z", "3/3/2021")]
    #[case("2021-03-03T10:00:00", "3/3/2021")]
    #[case("4/5/2022", "5/4/2022")]
    #[case("2022/4/5", "5/4/2022")]
    #[case("3/3/21", "3/3/2021")]
    #[case("25/12/2020", "25/12/2020")]
    #[case("3.3.2021", "3/3/2021")]
    #[case("2021.03.04", "4/3/2021")]
    #[case("3-Mar-2021", "3/3/2021")]
    #[case("2021 March 3", "3/3/2021")]
    #[case("Mar 3 21", "3/3/2021")]
    #[case("Wed, 03 Mar 2021 10:00:00 GMT", "3/3/2021")]
    fn test_normalize_formats(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_date(raw).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_is_stripped_before_parsing() {
        let raw = "\u{200f}Mar\u{a0}3,\u{202f}2021\u{200e}";
        let cleaned = strip_non_ascii(raw);
        assert!(cleaned.is_ascii());
        assert_eq!(normalize_date(raw).unwrap(), "3/3/2021");
        assert_eq!(
            normalize_date(raw).unwrap(),
            format_date(parse_lenient(&cleaned).unwrap())
        );
    }

    #[test]
    fn test_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        assert_eq!(format_date(date), "5/1/2021");
    }

    #[test]
    fn test_only_non_ascii_is_empty() {
        assert_eq!(normalize_date("\u{200f}\u{a0}"), Err(DateParseError::Empty));
        assert_eq!(normalize_date(""), Err(DateParseError::Empty));
    }

    #[test]
    fn test_garbage_is_unrecognized() {
        match normalize_date("Varies with device") {
            Err(DateParseError::Unrecognized(text)) => {
                assert_eq!(text, "Varies with device")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    #[case("March 2021")]
    #[case("3/2021")]
    #[case("March 3")]
    #[case("3/3/021")]
    #[case("12 March 3 2021")]
    #[case("21-3-3")]
    fn test_partial_or_short_year_is_unrecognized(#[case] raw: &str) {
        assert_eq!(
            normalize_date(raw),
            Err(DateParseError::Unrecognized(raw.to_string()))
        );
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        assert!(normalize_date("February 30, 2021").is_err());
    }
}
