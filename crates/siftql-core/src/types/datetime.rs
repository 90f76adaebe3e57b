use chrono::{DateTime as ChronoDateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug, Display};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

///
/// DateTime
///
/// Wall-clock instant normalized to UTC.
/// Naive input is taken verbatim as the stored (UTC) value; input carrying
/// `Z` or an explicit offset is shifted to UTC before it is kept.
///

#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    #[must_use]
    pub fn new_checked(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, ss))
            .map(Self)
    }

    /// Parse an ISO 8601 date-time.
    ///
    /// Seconds (and a fraction) are optional; the date and time may be
    /// separated by `T` or a single space; a trailing `Z` or `±HH:MM` offset
    /// is optional. Date-only input never parses.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let canonical = canonicalize(s)?;

        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&canonical, format).ok())
        {
            return Some(Self(naive));
        }

        OFFSET_FORMATS
            .iter()
            .find_map(|format| ChronoDateTime::parse_from_str(&canonical, format).ok())
            .map(|dt| Self(dt.naive_utc()))
    }
}

// Rewrite the accepted spellings into the single shape the chrono formats expect.
fn canonicalize(s: &str) -> Option<String> {
    // Shortest accepted input is `YYYY-MM-DDTHH:MM`.
    if s.len() < 16 || !s.is_ascii() {
        return None;
    }

    let mut out = String::with_capacity(s.len() + 5);
    out.push_str(&s[..10]);
    match s.as_bytes()[10] {
        b'T' | b' ' => out.push('T'),
        _ => return None,
    }

    match s[11..].strip_suffix('Z') {
        Some(body) => {
            out.push_str(body);
            out.push_str("+00:00");
        }
        None => out.push_str(&s[11..]),
    }

    Some(out)
}

impl Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({self})")
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime {
        DateTime::new_checked(y, m, d, hh, mm, ss).unwrap()
    }

    #[test]
    fn naive_input_with_and_without_seconds() {
        let expected = dt(2019, 2, 12, 10, 2, 0);
        assert_eq!(DateTime::parse("2019-02-12T10:02:00"), Some(expected));
        assert_eq!(DateTime::parse("2019-02-12T10:02"), Some(expected));
        assert_eq!(DateTime::parse("2019-02-12 10:02"), Some(expected));
    }

    #[test]
    fn zulu_suffix_is_utc() {
        assert_eq!(
            DateTime::parse("2019-02-12T10:02Z"),
            Some(dt(2019, 2, 12, 10, 2, 0))
        );
        assert_eq!(
            DateTime::parse("2019-02-12T10:02:00Z"),
            Some(dt(2019, 2, 12, 10, 2, 0))
        );
    }

    #[test]
    fn explicit_offset_is_normalized() {
        assert_eq!(
            DateTime::parse("2019-02-12T10:02:00+03:00"),
            Some(dt(2019, 2, 12, 7, 2, 0))
        );
        assert_eq!(
            DateTime::parse("2020-01-01T00:00+08:00"),
            Some(dt(2019, 12, 31, 16, 0, 0))
        );
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = DateTime::parse("2018-05-05T03:04:05.250").unwrap();
        assert!(parsed > dt(2018, 5, 5, 3, 4, 5));
        assert!(parsed < dt(2018, 5, 5, 3, 4, 6));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "2019-02-12",
            "0",
            "date",
            "2019-02-12T27:00:00",
            "2019-02-12T21:00:00K",
            "2019-02-12X10:02",
            "2019-02-12T10:02+3",
            "",
        ] {
            assert!(DateTime::parse(raw).is_none(), "{raw} should not parse");
        }
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(dt(2019, 2, 12, 10, 2, 0).to_string(), "2019-02-12T10:02:00");
    }
}
