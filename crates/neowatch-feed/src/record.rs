//! Asteroid records as delivered by the feed.
//!
//! The wire shape is deserialized into the private `Raw*` types first so a
//! record with a missing or mistyped field can be reported by index and name
//! instead of failing the whole response.

use serde::{Deserialize, Deserializer};

/// Lower and upper bound of an estimated diameter, in one unit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// Estimated diameter bounds per unit. Only `feet` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: Option<DiameterRange>,
    pub meters: Option<DiameterRange>,
    pub miles: Option<DiameterRange>,
    pub feet: DiameterRange,
}

/// The closest approach the feed reports for a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    pub date: Option<String>,
    pub orbiting_body: Option<String>,
    pub miss_distance_miles: f64,
    pub velocity_mph: f64,
}

/// A validated near-earth-object record.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidRecord {
    pub id: Option<String>,
    pub name: String,
    pub nasa_jpl_url: Option<String>,
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    /// First entry of `close_approach_data`.
    pub close_approach: CloseApproach,
    /// Number of close-approach entries the feed listed.
    pub close_approach_count: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    id: Option<String>,
    name: String,
    nasa_jpl_url: Option<String>,
    absolute_magnitude_h: Option<f64>,
    estimated_diameter: EstimatedDiameter,
    is_potentially_hazardous_asteroid: bool,
    close_approach_data: Vec<RawCloseApproach>,
}

#[derive(Debug, Deserialize)]
struct RawCloseApproach {
    close_approach_date: Option<String>,
    orbiting_body: Option<String>,
    miss_distance: RawMissDistance,
    relative_velocity: RawRelativeVelocity,
}

#[derive(Debug, Deserialize)]
struct RawMissDistance {
    #[serde(deserialize_with = "number_or_string")]
    miles: f64,
}

#[derive(Debug, Deserialize)]
struct RawRelativeVelocity {
    #[serde(deserialize_with = "number_or_string")]
    miles_per_hour: f64,
}

impl TryFrom<RawRecord> for AsteroidRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let close_approach_count = raw.close_approach_data.len();
        let first = raw
            .close_approach_data
            .into_iter()
            .next()
            .ok_or_else(|| "close_approach_data is empty".to_string())?;

        let feet = raw.estimated_diameter.feet;
        if !feet.estimated_diameter_min.is_finite() || !feet.estimated_diameter_max.is_finite() {
            return Err("estimated_diameter.feet is not finite".to_string());
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            nasa_jpl_url: raw.nasa_jpl_url,
            absolute_magnitude_h: raw.absolute_magnitude_h,
            estimated_diameter: raw.estimated_diameter,
            is_potentially_hazardous_asteroid: raw.is_potentially_hazardous_asteroid,
            close_approach: CloseApproach {
                date: first.close_approach_date,
                orbiting_body: first.orbiting_body,
                miss_distance_miles: first.miss_distance.miles,
                velocity_mph: first.relative_velocity.miles_per_hour,
            },
            close_approach_count,
        })
    }
}

/// The feed encodes distances and velocities as decimal strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    let value = match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => n,
        Numeric::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {s:?}: {e}")))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("number is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> Result<AsteroidRecord, String> {
        let raw: RawRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
        AsteroidRecord::try_from(raw)
    }

    #[test]
    fn test_string_encoded_numbers() {
        let record = raw(json!({
            "name": "(2015 RC)",
            "is_potentially_hazardous_asteroid": false,
            "estimated_diameter": {
                "feet": { "estimated_diameter_min": 59.8, "estimated_diameter_max": 133.7 }
            },
            "close_approach_data": [{
                "close_approach_date": "2015-09-08",
                "orbiting_body": "Earth",
                "miss_distance": { "miles": "24522.2317", "lunar": "0.1" },
                "relative_velocity": { "miles_per_hour": "43950.08", "kilometers_per_hour": "70731" }
            }]
        }))
        .unwrap();

        assert_eq!(record.close_approach.miss_distance_miles, 24522.2317);
        assert_eq!(record.close_approach.velocity_mph, 43950.08);
        assert_eq!(record.close_approach.orbiting_body.as_deref(), Some("Earth"));
        assert_eq!(record.close_approach_count, 1);
        assert!(record.estimated_diameter.kilometers.is_none());
    }

    #[test]
    fn test_plain_numbers_accepted() {
        let record = raw(json!({
            "name": "Numeric",
            "is_potentially_hazardous_asteroid": true,
            "estimated_diameter": {
                "feet": { "estimated_diameter_min": 10.0, "estimated_diameter_max": 20.0 }
            },
            "close_approach_data": [{
                "miss_distance": { "miles": 1000 },
                "relative_velocity": { "miles_per_hour": 2000 }
            }]
        }))
        .unwrap();
        assert_eq!(record.close_approach.miss_distance_miles, 1000.0);
    }

    #[test]
    fn test_empty_close_approach_rejected() {
        let err = raw(json!({
            "name": "Lonely",
            "is_potentially_hazardous_asteroid": false,
            "estimated_diameter": {
                "feet": { "estimated_diameter_min": 1.0, "estimated_diameter_max": 2.0 }
            },
            "close_approach_data": []
        }))
        .unwrap_err();
        assert!(err.contains("close_approach_data"));
    }

    #[test]
    fn test_non_numeric_string_rejected() {
        let err = raw(json!({
            "name": "Garbled",
            "is_potentially_hazardous_asteroid": false,
            "estimated_diameter": {
                "feet": { "estimated_diameter_min": 1.0, "estimated_diameter_max": 2.0 }
            },
            "close_approach_data": [{
                "miss_distance": { "miles": "far" },
                "relative_velocity": { "miles_per_hour": "10" }
            }]
        }))
        .unwrap_err();
        assert!(err.contains("far"));
    }
}
