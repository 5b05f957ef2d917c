//! Asteroid entities derived from feed records.

use glam::Vec3;

use crate::classify::{HazardClass, SizeClass};

/// One asteroid as it exists in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidEntity {
    pub name: String,
    pub hazard: HazardClass,
    pub size_class: SizeClass,
    /// Mesh radius under the active radius policy.
    pub radius: f32,
    pub position: Vec3,
    /// Euler angles (radians), advanced every frame.
    pub rotation: Vec3,
    pub diameter_feet: i64,
    pub velocity_mph: i64,
    pub distance_miles: i64,
}

impl AsteroidEntity {
    pub fn hazardous(&self) -> bool {
        self.hazard.is_hazardous()
    }

    pub fn summary(&self) -> EntitySummary {
        EntitySummary {
            name: self.name.clone(),
            velocity_mph: self.velocity_mph,
            diameter_feet: self.diameter_feet,
            distance_miles: self.distance_miles,
            hazard: self.hazard,
        }
    }
}

/// The fields the display collaborator shows for a picked asteroid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub name: String,
    pub velocity_mph: i64,
    pub diameter_feet: i64,
    pub distance_miles: i64,
    pub hazard: HazardClass,
}

impl EntitySummary {
    /// Hover text: name only.
    pub fn short_text(&self) -> String {
        format!("Name: {}", self.name)
    }

    /// Click/touch text.
    pub fn full_text(&self) -> String {
        format!(
            "Asteroid Name: {}\nVelocity: {} mph\nDiameter: {} feet\nDanger Level: {}",
            self.name,
            self.velocity_mph,
            self.diameter_feet,
            self.hazard.label()
        )
    }
}
