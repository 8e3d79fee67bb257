//! ISO-8601 date parsing for write bodies.
//!
//! Accepted: calendar dates (`yyyy`, `yyyy-MM`, `yyyy-MM-dd`, `yyyyMMdd`),
//! ordinal dates (`yyyy-DDD`), week dates (`yyyy-Www`, `yyyy-Www-D`), a
//! two-digit century, expanded years (`+yyyyyy`), each optionally followed by
//! `T` or a space and a time with an optional `Z`/offset. Nothing is trimmed.
//! An empty time part is ignored.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

static DATE_TIME_DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[T ]").unwrap());
static TIMEZONE_DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)z").unwrap());
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d{4}|[+-]\d{6})|(\d{2}|[+-]\d{4})$)").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:(\d{3})|(\d{2})(?:-?(\d{2}))?|W(\d{2})(?:-?(\d))?|)$").unwrap()
});
static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}(?:[.,]\d*)?)(?::?(\d{2}(?:[.,]\d*)?))?(?::?(\d{2}(?:[.,]\d*)?))?$")
        .unwrap()
});
static TIMEZONE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([Z+-].*)$").unwrap());
static TIMEZONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d{2})(?::?(\d{2}))?$").unwrap());

#[derive(Debug, Default, PartialEq)]
struct Parts<'a> {
    date: Option<&'a str>,
    time: Option<&'a str>,
    timezone: Option<&'a str>,
}

/// Parses an ISO-8601 date, with or without a time part. Returns the calendar
/// date as written; an offset is validated but not applied.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let parts = split(raw)?;
    let date = parse_date(parts.date?)?;

    if let Some(time) = parts.time.filter(|t| !t.is_empty()) {
        if !valid_time(time) {
            return None;
        }
    }
    if let Some(timezone) = parts.timezone {
        if !valid_timezone(timezone) {
            return None;
        }
    }

    Some(date)
}

fn split(raw: &str) -> Option<Parts<'_>> {
    let pieces: Vec<&str> = DATE_TIME_DELIMITER.split(raw).collect();
    if pieces.len() > 2 {
        return None;
    }

    let mut parts = Parts::default();
    let time_string;

    if pieces[0].contains(':') {
        // a bare time carries no date
        time_string = Some(pieces[0]);
    } else {
        let mut date = pieces[0];
        let mut time = pieces.get(1).copied();
        if let Some(found) = TIMEZONE_DELIMITER.find(date) {
            date = &raw[..found.start()];
            time = Some(&raw[found.start()..]);
        }
        parts.date = Some(date);
        time_string = time;
    }

    if let Some(time) = time_string.filter(|t| !t.is_empty()) {
        match TIMEZONE_SUFFIX.captures(time).and_then(|c| c.get(1)) {
            Some(zone) => {
                parts.time = Some(&time[..zone.start()]);
                parts.timezone = Some(zone.as_str());
            }
            None => parts.time = Some(time),
        }
    }

    Some(parts)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let captures = YEAR.captures(raw)?;
    let (year, consumed) = match (captures.get(1), captures.get(2)) {
        (Some(year), _) => (year.as_str().parse::<i32>().ok()?, year.end()),
        (None, Some(century)) => (century.as_str().parse::<i32>().ok()? * 100, century.end()),
        (None, None) => return None,
    };

    let captures = DATE.captures(&raw[consumed..])?;
    let unit = |i: usize| -> Option<u32> {
        match captures.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    if captures.get(4).is_some() {
        return week_date(year, unit(4)?, unit(5)?);
    }
    if captures.get(1).is_some() {
        return NaiveDate::from_yo_opt(year, unit(1)?);
    }

    NaiveDate::from_ymd_opt(year, unit(2)?, unit(3)?)
}

/// Week `week` (1-53), weekday `day` (1 = Monday) of the ISO week-year. Week
/// 53 of a 52-week year rolls into the next year.
fn week_date(year: i32, week: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=53).contains(&week) || !(1..=7).contains(&day) {
        return None;
    }

    let fourth_of_january = NaiveDate::from_ymd_opt(year, 1, 4)?;
    let offset = fourth_of_january.weekday().number_from_monday();
    let monday_of_week_one = fourth_of_january.checked_sub_days(Days::new(u64::from(offset - 1)))?;

    monday_of_week_one.checked_add_days(Days::new(u64::from((week - 1) * 7 + day - 1)))
}

fn time_unit(raw: Option<regex::Match<'_>>) -> Option<f64> {
    match raw {
        Some(m) => m.as_str().replace(',', ".").parse().ok(),
        None => Some(0.0),
    }
}

fn valid_time(raw: &str) -> bool {
    let Some(captures) = TIME.captures(raw) else {
        return false;
    };
    let (Some(hours), Some(minutes), Some(seconds)) = (
        time_unit(captures.get(1)),
        time_unit(captures.get(2)),
        time_unit(captures.get(3)),
    ) else {
        return false;
    };

    if hours == 24.0 {
        return minutes == 0.0 && seconds == 0.0;
    }

    (0.0..25.0).contains(&hours) && (0.0..60.0).contains(&minutes) && (0.0..60.0).contains(&seconds)
}

fn valid_timezone(raw: &str) -> bool {
    if raw == "Z" {
        return true;
    }

    match TIMEZONE.captures(raw) {
        Some(captures) => captures
            .get(3)
            .map_or(true, |m| m.as_str().parse::<u32>().is_ok_and(|minutes| minutes <= 59)),
        // an unrecognized offset counts as zero
        None => true,
    }
}
