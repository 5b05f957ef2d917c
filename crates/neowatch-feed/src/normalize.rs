//! Flattening of the date-keyed feed response.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, MalformedRecordError};
use crate::record::{AsteroidRecord, RawRecord};

#[derive(Debug, Deserialize)]
struct FeedResponse {
    element_count: Option<u64>,
    // Keys are `YYYY-MM-DD`, so map order is chronological.
    near_earth_objects: BTreeMap<String, Vec<serde_json::Value>>,
}

/// The usable content of one feed response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedBatch {
    /// Date key the records were taken from.
    pub date: Option<String>,
    /// `element_count` as reported by the feed, covering every date key.
    pub element_count: Option<u64>,
    /// Well-formed records in feed order.
    pub records: Vec<AsteroidRecord>,
    /// Records that were dropped, in feed order.
    pub skipped: Vec<MalformedRecordError>,
}

/// Parse a feed body and flatten it into a [`FeedBatch`].
///
/// Records come from the first (earliest) date key; any later keys are
/// ignored. A record that does not match the expected shape is skipped and
/// listed in [`FeedBatch::skipped`]; the rest of the batch is kept.
pub fn normalize_feed(body: &str) -> Result<FeedBatch, FetchError> {
    let response: FeedResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if response.near_earth_objects.len() > 1 {
        debug!(
            dates = response.near_earth_objects.len(),
            "feed returned several dates; using the earliest"
        );
    }

    let Some((date, values)) = response.near_earth_objects.into_iter().next() else {
        return Ok(FeedBatch {
            element_count: response.element_count,
            ..FeedBatch::default()
        });
    };

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        let name = value
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("<unnamed>")
            .to_string();

        let parsed = serde_json::from_value::<RawRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(AsteroidRecord::try_from);

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                let error = MalformedRecordError {
                    index,
                    name,
                    reason,
                };
                warn!("{error}");
                skipped.push(error);
            }
        }
    }

    Ok(FeedBatch {
        date: Some(date),
        element_count: response.element_count,
        records,
        skipped,
    })
}
