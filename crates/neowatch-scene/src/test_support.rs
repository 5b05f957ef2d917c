//! Record builders shared by the unit tests.

use neowatch_feed::{AsteroidRecord, CloseApproach, DiameterRange, EstimatedDiameter};

pub(crate) fn record(
    name: &str,
    hazardous: bool,
    min_feet: f64,
    max_feet: f64,
    mph: f64,
    miles: f64,
) -> AsteroidRecord {
    AsteroidRecord {
        id: None,
        name: name.to_string(),
        nasa_jpl_url: None,
        absolute_magnitude_h: None,
        estimated_diameter: EstimatedDiameter {
            kilometers: None,
            meters: None,
            miles: None,
            feet: DiameterRange {
                estimated_diameter_min: min_feet,
                estimated_diameter_max: max_feet,
            },
        },
        is_potentially_hazardous_asteroid: hazardous,
        close_approach: CloseApproach {
            date: None,
            orbiting_body: None,
            miss_distance_miles: miles,
            velocity_mph: mph,
        },
        close_approach_count: 1,
    }
}
