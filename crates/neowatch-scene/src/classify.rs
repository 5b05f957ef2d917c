//! Size and hazard classification of asteroid records.

use neowatch_config::{DiameterPolicy, RadiusPolicy};
use neowatch_feed::AsteroidRecord;

/// Divisor applied to the minimum feet estimate before bucketing.
pub const SIZE_DIVISOR: f64 = 2000.0;
/// Ratio at which an asteroid stops being small.
pub const MEDIUM_THRESHOLD: f64 = 0.01;
/// Ratio at which an asteroid becomes large.
pub const LARGE_THRESHOLD: f64 = 0.1;
/// Smallest radius the continuous policy produces.
pub const CONTINUOUS_MIN_RADIUS: f32 = 0.3;

/// Discrete size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Bucket for a size ratio `d` (see [`size_ratio`]).
    pub fn from_ratio(d: f64) -> Self {
        if d < MEDIUM_THRESHOLD {
            Self::Small
        } else if d < LARGE_THRESHOLD {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Mesh radius under [`RadiusPolicy::Tiered`].
    pub fn tiered_radius(self) -> f32 {
        match self {
            Self::Small => 0.2,
            Self::Medium => 0.3,
            Self::Large => 0.4,
        }
    }
}

/// Visual treatment chosen by the hazardous flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardClass {
    Hazardous,
    Safe,
}

impl HazardClass {
    pub fn from_flag(hazardous: bool) -> Self {
        if hazardous { Self::Hazardous } else { Self::Safe }
    }

    pub fn is_hazardous(self) -> bool {
        self == Self::Hazardous
    }

    /// Label shown in the full summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hazardous => "Potentially Hazardous",
            Self::Safe => "Nonthreatening",
        }
    }

    /// Glow color, linear RGB.
    pub fn glow(self) -> [f32; 3] {
        match self {
            Self::Hazardous => [1.0, 0.1, 0.1],
            Self::Safe => [0.1, 1.0, 0.2],
        }
    }
}

/// `feet.estimated_diameter_min / 2000`.
pub fn size_ratio(record: &AsteroidRecord) -> f64 {
    record.estimated_diameter.feet.estimated_diameter_min / SIZE_DIVISOR
}

/// Mesh radius for a size ratio under `policy`.
pub fn render_radius(policy: RadiusPolicy, d: f64) -> f32 {
    match policy {
        RadiusPolicy::Tiered => SizeClass::from_ratio(d).tiered_radius(),
        RadiusPolicy::Continuous => (CONTINUOUS_MIN_RADIUS * d as f32).max(CONTINUOUS_MIN_RADIUS),
    }
}

/// Diameter in whole feet for the summary panel.
///
/// `DuplicatedMax` adds the maximum estimate to itself, which is what older
/// releases displayed; it is kept selectable so those numbers can be
/// reproduced.
pub fn display_diameter_feet(policy: DiameterPolicy, record: &AsteroidRecord) -> i64 {
    let feet = &record.estimated_diameter.feet;
    let sum = match policy {
        DiameterPolicy::MinMaxMean => feet.estimated_diameter_min + feet.estimated_diameter_max,
        DiameterPolicy::DuplicatedMax => feet.estimated_diameter_max + feet.estimated_diameter_max,
    };
    (sum / 2.0).trunc() as i64
}
