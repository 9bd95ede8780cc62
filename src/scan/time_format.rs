//! Timestamp rendering for the `$time` placeholder.
//!
//! Two renderings exist: a fixed RFC 3339 profile with nanosecond precision,
//! and a small date pattern language (`dd/MM/yyyy HH:mm`) translated into
//! chrono's strftime items.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;

/// Resolves an IANA zone name, falling back to UTC when the name is unknown.
pub fn zone_or_utc(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|_| {
        debug!("Unknown time zone {name:?}, using UTC");
        Tz::UTC
    })
}

/// Renders `instant` as RFC 3339 with nine fractional digits (`Z` for UTC).
pub fn format_fixed<T>(instant: &DateTime<T>) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Renders `instant` with a date pattern such as `dd/MM/yyyy`.
pub fn format_with_pattern<T>(instant: &DateTime<T>, pattern: &str) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    instant.format(&translate_pattern(pattern)).to_string()
}

/// Renders the `$time` placeholder for `now` given its arguments.
///
/// No zone: UTC, fixed profile. Zone only: converted to that zone. Zone and
/// pattern: formatted with the pattern.
pub fn render_time(now: DateTime<Utc>, zone: Option<&str>, pattern: Option<&str>) -> String {
    let Some(zone) = zone else {
        return format_fixed(&now);
    };
    let local = now.with_timezone(&zone_or_utc(zone));
    match pattern {
        Some(pattern) => format_with_pattern(&local, pattern),
        None => format_fixed(&local),
    }
}

/// Translates a date pattern into a strftime string.
///
/// Runs of one repeated letter form a token; text in single quotes is literal
/// (`''` is a quote); everything else, including unrecognised letter runs, is
/// copied through.
pub fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                push_literal(&mut out, '\'');
                continue;
            }
            while let Some(quoted) = chars.next() {
                if quoted != '\'' {
                    push_literal(&mut out, quoted);
                } else if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut out, '\'');
                } else {
                    break;
                }
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            continue;
        }

        let mut count = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            count += 1;
        }
        match specifier(c, count) {
            Some(strftime) => out.push_str(strftime),
            None => (0..count).for_each(|_| push_literal(&mut out, c)),
        }
    }

    out
}

fn specifier(letter: char, count: usize) -> Option<&'static str> {
    let strftime = match (letter, count) {
        ('y' | 'Y', 4) => "%Y",
        ('y' | 'Y', 2) => "%y",
        ('M', 4) => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('d' | 'D', 2) => "%d",
        ('d' | 'D', 1) => "%-d",
        ('E', 4) => "%A",
        ('E', 3) => "%a",
        ('H', 2) => "%H",
        ('H', 1) => "%-H",
        ('h', 2) => "%I",
        ('h', 1) => "%-I",
        ('m', 2) => "%M",
        ('m', 1) => "%-M",
        ('s', 2) => "%S",
        ('s', 1) => "%-S",
        ('S', 3) => "%3f",
        ('S', 6) => "%6f",
        ('S', 9) => "%9f",
        ('a', 1) => "%p",
        ('Z', 1) => "%z",
        ('X', 3) => "%:z",
        ('z', 1) => "%Z",
        _ => return None,
    };
    Some(strftime)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
