//! Asteroid scene population.
//!
//! Turns feed records into renderable, pickable asteroid entities and owns
//! the scene state they live in. Rendering and on-screen display are
//! collaborators behind the [`RenderBackend`] and [`SummaryDisplay`] traits;
//! [`HeadlessScene`] is an in-memory backend with CPU picking.

pub mod backdrop;
pub mod backend;
pub mod camera;
pub mod classify;
pub mod context;
pub mod entity;
pub mod headless;
pub mod placement;
pub mod pointer;
pub mod population;

pub use backdrop::Backdrop;
pub use backend::{
    EntityHandle, GeometryDescriptor, LightDescriptor, MaterialDescriptor, RenderBackend,
    SummaryDetail, SummaryDisplay, rgb_from_hex,
};
pub use camera::{Camera, Ray};
pub use classify::{HazardClass, SizeClass, display_diameter_feet, render_radius, size_ratio};
pub use context::{ApplyOutcome, FETCH_FAILED_MESSAGE, FetchGeneration, SceneContext};
pub use entity::{AsteroidEntity, EntitySummary};
pub use headless::{HeadlessScene, SceneEvent};
pub use placement::ShellPlacer;
pub use pointer::{Viewport, pointer_to_ndc};
pub use population::populate;

#[cfg(test)]
mod test_support;
