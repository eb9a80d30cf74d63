use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

// Timestamps on OCR'd SOF sheets come in several loosely written shapes.
// Each shape is one pattern here, tried strictly in order; the first match
// wins and a string matching none of them is simply unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePattern {
    // "03.08 13.00", "20.01.2021 2005": day.month with an optional year,
    // followed by a clock time in any of the clock shapes below.
    DayMonthTime,
    // Bare compact clock, "2005".
    CompactTime,
    // "13.00"
    DottedTime,
    // "13:00"
    ColonTime,
    // Full date-times in a handful of common formats.
    Generic,
}

pub const PATTERN_ORDER: [TimePattern; 5] = [
    TimePattern::DayMonthTime,
    TimePattern::CompactTime,
    TimePattern::DottedTime,
    TimePattern::ColonTime,
    TimePattern::Generic,
];

const GENERIC_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d %b %Y %H:%M",
];

impl TimePattern {
    fn try_parse(self, raw: &str, today: NaiveDate) -> Option<NaiveDateTime> {
        match self {
            TimePattern::DayMonthTime => parse_day_month(raw, today),
            TimePattern::CompactTime => Some(today.and_time(parse_compact_clock(raw)?)),
            TimePattern::DottedTime => Some(today.and_time(parse_separated_clock(raw, '.')?)),
            TimePattern::ColonTime => Some(today.and_time(parse_separated_clock(raw, ':')?)),
            TimePattern::Generic => GENERIC_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok()),
        }
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_timestamp_on(raw, Local::now().date_naive())
}

/// Same as [`parse_timestamp`] but resolved against an explicit reference
/// date instead of today. Date-less clock times land on `today`, and a
/// year-less day.month gets `today`'s year.
pub fn parse_timestamp_on(raw: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" || raw.eq_ignore_ascii_case("n/a") {
        return None;
    }
    PATTERN_ORDER.iter().find_map(|p| p.try_parse(raw, today))
}

pub fn hours_between(start: Option<&str>, end: Option<&str>) -> f64 {
    hours_between_on(start, end, Local::now().date_naive())
}

/// Elapsed hours between two raw timestamps. A missing or unparseable side
/// contributes nothing: the result is 0.0, never an error.
///
/// A negative span is assumed to have rolled past midnight and gets 24h
/// added back. That is a heuristic, not a calendar computation; a gap of
/// more than one day comes out wrong and is knowingly left that way.
pub fn hours_between_on(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> f64 {
    let start = match start.and_then(|s| parse_timestamp_on(s, today)) {
        Some(t) => t,
        None => return 0.0,
    };
    let end = match end.and_then(|s| parse_timestamp_on(s, today)) {
        Some(t) => t,
        None => return 0.0,
    };

    let mut hours = (end - start).num_seconds() as f64 / 3600.0;
    if hours < 0.0 {
        hours += 24.0;
    }
    hours
}

fn parse_day_month(raw: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let (date_raw, time_raw) = raw.split_once(char::is_whitespace)?;
    let time_raw = time_raw.trim();

    let mut parts = date_raw.split('.');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = match parts.next() {
        Some(y) => {
            let y: i32 = y.parse().ok()?;
            // Two-digit years show up on some sheets.
            if y < 100 {
                y + 2000
            } else {
                y
            }
        }
        None => today.year(),
    };
    if parts.next().is_some() {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = parse_separated_clock(time_raw, '.')
        .or_else(|| parse_separated_clock(time_raw, ':'))
        .or_else(|| parse_compact_clock(time_raw))?;
    Some(date.and_time(time))
}

fn parse_compact_clock(raw: &str) -> Option<NaiveTime> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    clock_time(raw[..2].parse().ok()?, raw[2..].parse().ok()?)
}

fn parse_separated_clock(raw: &str, sep: char) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(sep)?;
    if minute.len() != 2 {
        return None;
    }
    clock_time(hour.parse().ok()?, minute.parse().ok()?)
}

fn clock_time(hour: u32, minute: u32) -> Option<NaiveTime> {
    // "2400" means midnight ending the day. Mapping it to 00:00 leaves a
    // negative span that the rollover in hours_between turns back into the
    // intended duration.
    if hour == 24 && minute == 0 {
        return NaiveTime::from_hms_opt(0, 0, 0);
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}
