//! Feed error types.

/// A date submission rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid date")]
    Empty,

    #[error("Please enter a valid date (expected YYYY-MM-DD, got {0:?})")]
    Malformed(String),

    #[error("Please choose a date after the year 1900 (got {0})")]
    YearTooEarly(i32),

    #[error("Please choose a date before 2040 (got {0})")]
    YearTooLate(i32),

    #[error("End date must not precede start date")]
    EndBeforeStart,

    #[error("Date range spans {days} days; the feed allows at most 7")]
    RangeTooLong { days: i64 },
}

/// A request that was sent but did not produce a usable response body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-OK status.
    #[error("feed returned {code} {text}")]
    Status { code: u16, text: String },

    /// Connection, TLS, or timeout failure.
    #[error("feed request failed: {0}")]
    Transport(String),

    /// The body was not the expected JSON document.
    #[error("feed response could not be decoded: {0}")]
    Decode(String),

    /// The blocking request task was cancelled or panicked.
    #[error("feed task did not complete: {0}")]
    TaskJoin(String),
}

/// One record in an otherwise valid response lacked a required field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {index} ({name}) skipped: {reason}")]
pub struct MalformedRecordError {
    /// Position of the record in the date's array.
    pub index: usize,
    /// Record name, or `<unnamed>` when the name itself is missing.
    pub name: String,
    pub reason: String,
}

/// Everything that can go wrong with a single date submission.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
