//! Near-earth-object feed access.
//!
//! Validates a requested date, issues a single GET against the NeoWs feed
//! endpoint and flattens the date-keyed response into an ordered list of
//! [`AsteroidRecord`]s. Records missing required fields are skipped and
//! reported on the returned [`FeedBatch`].

mod client;
mod date;
mod error;
mod normalize;
mod record;

pub use client::{FEED_PATH, FeedClient};
pub use date::{FeedDate, FeedRequest, MAX_RANGE_DAYS, MAX_YEAR, MIN_YEAR};
pub use error::{FeedError, FetchError, MalformedRecordError, ValidationError};
pub use normalize::{FeedBatch, normalize_feed};
pub use record::{AsteroidRecord, CloseApproach, DiameterRange, EstimatedDiameter};
