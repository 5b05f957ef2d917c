//! Collaborator interfaces the scene calls into.
//!
//! The scene never talks to a GPU or a UI toolkit directly. A
//! [`RenderBackend`] owns meshes and answers picking queries; a
//! [`SummaryDisplay`] shows text to the user.

use glam::Vec3;

use crate::entity::EntitySummary;

/// Opaque handle to an object owned by a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u64);

/// Shape of a renderable object.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDescriptor {
    /// UV sphere.
    Sphere { radius: f32, segments: u32 },
    /// Cube subdivided `detail` times and projected onto a sphere.
    Polyhedron { radius: f32, detail: u32 },
}

impl GeometryDescriptor {
    /// Radius of the bounding sphere centered on the object's origin.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius, .. } | Self::Polyhedron { radius, .. } => *radius,
        }
    }
}

/// Surface appearance of a renderable object.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    /// Diffuse texture path.
    pub texture: &'static str,
    /// Emissive texture path, for glowing objects.
    pub emissive_map: Option<&'static str>,
    /// Emissive tint, linear RGB.
    pub emissive_color: Option<[f32; 3]>,
    pub opacity: f32,
    /// Render the inside faces instead of the outside.
    pub back_side: bool,
}

impl MaterialDescriptor {
    pub fn textured(texture: &'static str) -> Self {
        Self {
            texture,
            emissive_map: None,
            emissive_color: None,
            opacity: 1.0,
            back_side: false,
        }
    }
}

/// A light source in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum LightDescriptor {
    /// Uniform light from every direction.
    Ambient { color: [f32; 3] },
    /// Parallel light shining from `position` toward the origin.
    Directional {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
    },
}

/// `0xRRGGBB` to linear-ish RGB in `[0, 1]`.
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// The 3D scene graph and renderer.
pub trait RenderBackend {
    /// Allocate an object. It is not visible until [`add`](Self::add).
    fn create_entity(
        &mut self,
        geometry: &GeometryDescriptor,
        material: &MaterialDescriptor,
    ) -> EntityHandle;

    /// Insert the object into the visible scene.
    fn add(&mut self, handle: EntityHandle);

    /// Take the object out of the visible scene.
    fn remove(&mut self, handle: EntityHandle);

    /// Free the object's geometry and material. The handle is dead afterwards.
    fn release(&mut self, handle: EntityHandle);

    /// Update position and Euler rotation (radians).
    fn set_transform(&mut self, handle: EntityHandle, position: Vec3, rotation: Vec3);

    /// Add a light. Lights live as long as the backend.
    fn add_light(&mut self, light: &LightDescriptor);

    /// Orbit the view camera around the origin; see [`Camera::orbit`](crate::camera::Camera::orbit).
    fn orbit_camera(&mut self, yaw: f32, pitch: f32);

    /// Nearest object among `candidates` under the normalized device
    /// coordinate `(ndc_x, ndc_y)`, both in `[-1, 1]` with +Y up.
    fn pick(&self, ndc_x: f32, ndc_y: f32, candidates: &[EntityHandle]) -> Option<EntityHandle>;

    /// The viewport was resized to `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn render_frame(&mut self);
}

/// How much of a summary to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryDetail {
    /// Name only (hover).
    Short,
    /// Name, velocity, diameter, and danger level (click/touch).
    Full,
}

/// Where asteroid details and user-facing messages go.
pub trait SummaryDisplay {
    /// Show the summary of the asteroid behind `handle`.
    fn show_summary(&mut self, handle: EntityHandle, summary: &EntitySummary, detail: SummaryDetail);

    fn hide_summary(&mut self);

    /// Number of asteroids in the batch just applied.
    fn show_count(&mut self, count: usize);

    /// A failed submission.
    fn report_error(&mut self, message: &str);
}
