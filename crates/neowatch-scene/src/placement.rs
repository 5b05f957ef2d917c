//! Placement of asteroids on a spherical shell around the origin.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Direction vectors shorter than this are redrawn before normalizing.
const MIN_DIRECTION_LENGTH: f32 = 1e-4;

/// Draws positions at a fixed distance from the origin.
///
/// Directions are not deduplicated; two asteroids may land arbitrarily close
/// to each other.
pub struct ShellPlacer {
    rng: ChaCha8Rng,
    seed: u64,
    radius: f32,
}

impl ShellPlacer {
    /// Deterministic placer for `seed`.
    pub fn new(seed: u64, radius: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            radius,
        }
    }

    /// Placer seeded from `seed`, or from the thread RNG when `None`.
    pub fn from_optional_seed(seed: Option<u64>, radius: f32) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self::new(seed, radius)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Next position: three uniform values in `[-1, 1)`, normalized, scaled
    /// to the shell radius.
    pub fn next_position(&mut self) -> Vec3 {
        loop {
            let direction = Vec3::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );
            if direction.length() >= MIN_DIRECTION_LENGTH {
                return direction.normalize() * self.radius;
            }
        }
    }
}
