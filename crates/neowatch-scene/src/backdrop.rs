//! Earth, clouds, moon, sky sphere and lighting.
//!
//! Created once with the scene and animated every frame. None of these are
//! pickable.

use glam::Vec3;

use crate::backend::{
    EntityHandle, GeometryDescriptor, LightDescriptor, MaterialDescriptor, RenderBackend,
    rgb_from_hex,
};

pub const EARTH_RADIUS: f32 = 5.0;
pub const CLOUDS_RADIUS: f32 = 5.03;
pub const MOON_RADIUS: f32 = 1.3;
pub const UNIVERSE_RADIUS: f32 = 90.0;
pub const MOON_START: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const MOON_ORBIT_RADIUS: f32 = 15.0;

pub const AMBIENT_LIGHT_COLOR: u32 = 0x333333;
pub const SUN_LIGHT_COLOR: u32 = 0xeeeeee;
pub const SUN_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 3.0, 5.0);

/// Spin rates in radians per second.
pub const EARTH_SPIN_RATE: f32 = 0.03;
pub const CLOUDS_SPIN_RATE: f32 = 0.018;
pub const MOON_SPIN_RATE: f32 = 0.03;
/// Moon orbital angular rate in radians per second.
pub const MOON_ORBIT_RATE: f32 = 0.08;

/// Handles and animation state of the fixed scenery.
#[derive(Debug)]
pub struct Backdrop {
    earth: EntityHandle,
    clouds: EntityHandle,
    moon: EntityHandle,
    universe: EntityHandle,
    earth_spin: f32,
    clouds_spin: f32,
    moon_spin: f32,
    moon_orbit_angle: f32,
    moon_position: Vec3,
}

impl Backdrop {
    pub fn spawn(backend: &mut impl RenderBackend) -> Self {
        for light in lights() {
            backend.add_light(&light);
        }

        let earth = backend.create_entity(
            &sphere(EARTH_RADIUS, 32),
            &MaterialDescriptor::textured("images/earth_no_clouds.jpg"),
        );
        let clouds = backend.create_entity(
            &sphere(CLOUDS_RADIUS, 32),
            &MaterialDescriptor {
                opacity: 0.8,
                ..MaterialDescriptor::textured("images/clouds_earth.png")
            },
        );
        let moon = backend.create_entity(
            &sphere(MOON_RADIUS, 32),
            &MaterialDescriptor::textured("images/moon-texture.jpg"),
        );
        let universe = backend.create_entity(
            &sphere(UNIVERSE_RADIUS, 64),
            &MaterialDescriptor {
                back_side: true,
                ..MaterialDescriptor::textured("images/universe.png")
            },
        );

        let backdrop = Self {
            earth,
            clouds,
            moon,
            universe,
            earth_spin: 0.0,
            clouds_spin: 0.0,
            moon_spin: 0.0,
            moon_orbit_angle: 0.0,
            moon_position: MOON_START,
        };
        backdrop.push_transforms(backend);
        for handle in backdrop.handles() {
            backend.add(handle);
        }
        backdrop
    }

    pub fn handles(&self) -> [EntityHandle; 4] {
        [self.earth, self.clouds, self.moon, self.universe]
    }

    pub fn moon(&self) -> EntityHandle {
        self.moon
    }

    pub fn moon_position(&self) -> Vec3 {
        self.moon_position
    }

    /// Spin the bodies and move the moon along its orbit.
    pub fn advance(&mut self, dt: f32, backend: &mut impl RenderBackend) {
        self.earth_spin += EARTH_SPIN_RATE * dt;
        self.clouds_spin += CLOUDS_SPIN_RATE * dt;
        self.moon_spin += MOON_SPIN_RATE * dt;
        self.moon_orbit_angle += MOON_ORBIT_RATE * dt;

        let theta = self.moon_orbit_angle;
        // Height is kept from the starting position; the orbit is in XZ.
        self.moon_position = Vec3::new(
            -theta.cos() * MOON_ORBIT_RADIUS,
            self.moon_position.y,
            theta.sin() * MOON_ORBIT_RADIUS,
        );
        self.push_transforms(backend);
    }

    fn push_transforms(&self, backend: &mut impl RenderBackend) {
        backend.set_transform(self.earth, Vec3::ZERO, Vec3::new(0.0, self.earth_spin, 0.0));
        backend.set_transform(self.clouds, Vec3::ZERO, Vec3::new(0.0, self.clouds_spin, 0.0));
        backend.set_transform(
            self.moon,
            self.moon_position,
            Vec3::new(0.0, self.moon_spin, 0.0),
        );
        backend.set_transform(self.universe, Vec3::ZERO, Vec3::ZERO);
    }
}

/// A dim ambient fill plus a sun-like directional light.
pub fn lights() -> [LightDescriptor; 2] {
    [
        LightDescriptor::Ambient {
            color: rgb_from_hex(AMBIENT_LIGHT_COLOR),
        },
        LightDescriptor::Directional {
            color: rgb_from_hex(SUN_LIGHT_COLOR),
            intensity: 1.0,
            position: SUN_LIGHT_POSITION,
        },
    ]
}

fn sphere(radius: f32, segments: u32) -> GeometryDescriptor {
    GeometryDescriptor::Sphere { radius, segments }
}
