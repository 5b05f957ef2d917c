//! Date validation for feed requests.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// Earliest accepted year (inclusive).
pub const MIN_YEAR: i32 = 1900;
/// First rejected year.
pub const MAX_YEAR: i32 = 2040;
/// Longest span the feed endpoint accepts, counting both ends.
pub const MAX_RANGE_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date that passed client-side validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedDate(NaiveDate);

impl FeedDate {
    /// Parse and validate a `YYYY-MM-DD` string.
    ///
    /// Checks run in the order the form reports them: empty input first,
    /// then shape, then the year window `[MIN_YEAR, MAX_YEAR)`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Empty);
        }

        // chrono accepts unpadded fields; the feed does not.
        let shaped = input.len() == 10
            && input.char_indices().all(|(i, c)| match i {
                4 | 7 => c == '-',
                _ => c.is_ascii_digit(),
            });
        if !shaped {
            return Err(ValidationError::Malformed(input.to_string()));
        }

        let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map_err(|_| ValidationError::Malformed(input.to_string()))?;
        Self::from_naive(date)
    }

    /// Validate an already-parsed date against the year window.
    pub fn from_naive(date: NaiveDate) -> Result<Self, ValidationError> {
        let year = date.year();
        if year < MIN_YEAR {
            return Err(ValidationError::YearTooEarly(year));
        }
        if year >= MAX_YEAR {
            return Err(ValidationError::YearTooLate(year));
        }
        Ok(Self(date))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// The date window sent to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRequest {
    start: FeedDate,
    end: FeedDate,
}

impl FeedRequest {
    /// A one-day request, the form's normal submission.
    pub fn single(date: &str) -> Result<Self, ValidationError> {
        let date = FeedDate::parse(date)?;
        Ok(Self {
            start: date,
            end: date,
        })
    }

    /// A request spanning `start..=end`.
    pub fn range(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = FeedDate::parse(start)?;
        let end = FeedDate::parse(end)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        let days = (end.0 - start.0).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(ValidationError::RangeTooLong { days });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> FeedDate {
        self.start
    }

    pub fn end(&self) -> FeedDate {
        self.end
    }
}
