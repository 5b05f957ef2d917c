//! Perspective camera and picking rays.

use glam::{Mat4, Quat, Vec3};
use neowatch_config::CameraConfig;

/// Orbit pitch stops this far short of straight up or down, in radians.
const ORBIT_POLE_MARGIN: f32 = 0.05;

/// A perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion. Identity looks down -Z.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Camera {
    /// Camera on +Z at `config.distance`, looking at the origin.
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, config.distance),
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            ..Self::default()
        };
        camera.set_aspect_ratio(width as f32, height as f32);
        camera
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation)).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio. Zero-sized viewports are ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Swing the camera around the origin by `yaw` (about +Y) and `pitch`
    /// (toward +Y), both in radians, keeping its distance and aiming it at
    /// the origin. Pitch stops just short of the poles.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let distance = self.position.length();
        if distance <= f32::EPSILON {
            return;
        }
        let limit = std::f32::consts::FRAC_PI_2 - ORBIT_POLE_MARGIN;
        let current_yaw = self.position.x.atan2(self.position.z);
        let current_pitch = (self.position.y / distance).clamp(-1.0, 1.0).asin();

        let yaw = current_yaw + yaw;
        let pitch = (current_pitch + pitch).clamp(-limit, limit);
        self.position = distance
            * Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        self.rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch);
    }

    /// World-space ray through a normalized device coordinate.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect_ratio;
        let local = Vec3::new(ndc_x * half_width, ndc_y * half_height, -1.0);
        Ray {
            origin: self.position,
            direction: (self.rotation * local).normalize(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// A half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit on a sphere, if any.
    ///
    /// An origin inside the sphere hits the far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t_near = -b - sqrt_disc;
        let t_far = -b + sqrt_disc;
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            Some(t_far)
        } else {
            None
        }
    }
}
