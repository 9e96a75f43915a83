use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// A calendar date, sent to the Stack Exchange API as the number of seconds
/// from the Unix Epoch to 00:00 UTC of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochDate(NaiveDate);

#[derive(Debug, thiserror::Error)]
#[error("'{input}' is not a calendar date of the form YYYY-MM-DD")]
pub struct InvalidDate {
    input: String,
    #[source]
    source: Option<chrono::ParseError>,
}

/// Four-digit year, two-digit month and day, nothing else.
fn has_iso_date_shape(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl EpochDate {
    pub fn parse(s: &str) -> Result<Self, InvalidDate> {
        let trimmed = s.trim();
        let invalid = |source| InvalidDate {
            input: s.to_owned(),
            source,
        };
        if !has_iso_date_shape(trimmed) {
            return Err(invalid(None));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| invalid(Some(e)))
    }

    pub fn timestamp(&self) -> i64 {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}

impl fmt::Display for EpochDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// The range of days over which tag popularity is aggregated.
// `from_date <= to_date` is not enforced; inverted ranges go to the API unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub from_date: EpochDate,
    pub to_date: EpochDate,
}

impl QueryWindow {
    pub fn parse(from_date: &str, to_date: &str) -> Result<Self, InvalidDate> {
        Ok(Self {
            from_date: EpochDate::parse(from_date)?,
            to_date: EpochDate::parse(to_date)?,
        })
    }
}
