//! Timestamp parsing for query values.
//!
//! Layouts are fixed-width: four-digit years, two-digit month, day, hour,
//! minute and second, an upper-case `T` and `Z`. Inputs are checked against
//! that shape before chrono validates the components.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{LayoutError, TimestampError};

/// Supported timestamp layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// RFC 3339 date-time with offset (`2025-08-17T18:30:00Z`).
    Rfc3339,
    /// Calendar date (`2025-08-17`), midnight UTC.
    Date,
    /// Date and time without offset (`2025-08-17 18:30:00`), UTC.
    /// Fractional seconds are accepted.
    DateTime,
}

impl TimestampFormat {
    /// All formats in priority order.
    pub const ALL: [Self; 3] = [Self::Rfc3339, Self::Date, Self::DateTime];

    /// Reference layout, as shown in error messages.
    #[must_use]
    pub fn layout(self) -> &'static str {
        match self {
            Self::Rfc3339 => "YYYY-MM-DDThh:mm:ssZ",
            Self::Date => "YYYY-MM-DD",
            Self::DateTime => "YYYY-MM-DD hh:mm:ss",
        }
    }

    fn parse(self, raw: &str) -> Result<DateTime<Utc>, LayoutError> {
        if !self.matches_shape(raw) {
            return Err(LayoutError::Shape {
                input: raw.to_string(),
                layout: self.layout(),
            });
        }

        match self {
            Self::Rfc3339 => DateTime::parse_from_rfc3339(raw).map(|t| t.with_timezone(&Utc)),
            Self::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            Self::DateTime => {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|t| t.and_utc())
            }
        }
        .map_err(LayoutError::from)
    }

    fn matches_shape(self, raw: &str) -> bool {
        let bytes = raw.as_bytes();
        match self {
            Self::Date => bytes.len() == 10 && is_date(bytes),
            Self::DateTime => {
                bytes.len() >= 19
                    && is_date(&bytes[..10])
                    && bytes[10] == b' '
                    && is_time(&bytes[11..19])
                    && is_fraction(&bytes[19..])
            }
            Self::Rfc3339 => {
                bytes.len() >= 20
                    && is_date(&bytes[..10])
                    && bytes[10] == b'T'
                    && is_time(&bytes[11..19])
                    && !bytes[19..].contains(&b'z')
            }
        }
    }
}

/// `dddd-dd-dd`
fn is_date(b: &[u8]) -> bool {
    digits_at(b, &[0, 1, 2, 3, 5, 6, 8, 9]) && b[4] == b'-' && b[7] == b'-'
}

/// `dd:dd:dd`
fn is_time(b: &[u8]) -> bool {
    digits_at(b, &[0, 1, 3, 4, 6, 7]) && b[2] == b':' && b[5] == b':'
}

/// Empty, or `.` followed by one or more digits.
fn is_fraction(b: &[u8]) -> bool {
    match b.split_first() {
        None => true,
        Some((b'.', digits)) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        Some(_) => false,
    }
}

fn digits_at(b: &[u8], positions: &[usize]) -> bool {
    positions
        .iter()
        .all(|&i| b.get(i).is_some_and(u8::is_ascii_digit))
}

/// Parses a timestamp, returning the first format that succeeds.
///
/// When every format fails, the error of the *last* format tried is
/// reported, not the first.
///
/// # Example
///
/// ```rust
/// use hermes_extract::bind::parse_timestamp;
///
/// let ts = parse_timestamp("2025-08-17").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2025-08-17T00:00:00+00:00");
///
/// assert!(parse_timestamp("17/08/2025").is_err());
/// assert!(parse_timestamp("2025-8-7").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let [first, rest @ ..] = TimestampFormat::ALL;
    let mut last_err = match first.parse(raw) {
        Ok(ts) => return Ok(ts),
        Err(e) => e,
    };

    for format in rest {
        match format.parse(raw) {
            Ok(ts) => return Ok(ts),
            Err(e) => last_err = e,
        }
    }

    Err(TimestampError {
        input: raw.to_string(),
        source: last_err,
    })
}
