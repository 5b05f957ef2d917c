//! Scene state and the entry points the host drives.
//!
//! [`SceneContext`] owns the rendering and display collaborators, the
//! current asteroid batch, and the fetch generation counter. The host calls
//! it from a single thread: fetch completions, pointer events, and the
//! per-frame [`advance`](SceneContext::advance).

use glam::Vec3;
use neowatch_config::SceneConfig;
use neowatch_feed::{AsteroidRecord, FeedBatch, FeedError, ValidationError};
use tracing::{debug, info, warn};

use crate::backdrop::Backdrop;
use crate::backend::{
    EntityHandle, GeometryDescriptor, MaterialDescriptor, RenderBackend, SummaryDetail,
    SummaryDisplay,
};
use crate::classify::HazardClass;
use crate::entity::AsteroidEntity;
use crate::placement::ShellPlacer;
use crate::pointer::{Viewport, pointer_to_ndc};
use crate::population::populate;

/// Asteroid spin about X and Y, radians per second.
pub const ASTEROID_SPIN_RATE: f32 = 1.8;
/// Subdivision level of asteroid meshes.
pub const ASTEROID_DETAIL: u32 = 1;
/// Prefix of every user-facing fetch failure. Validation messages are shown
/// on their own.
pub const FETCH_FAILED_MESSAGE: &str = "Apologies, looks like your request was lost in space.";

/// Tag of one fetch request. Only the most recently issued tag is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchGeneration(u64);

/// What [`SceneContext::apply_fetch`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The batch replaced the scene's asteroids.
    Applied { count: usize, skipped: usize },
    /// The fetch failed; the scene is unchanged.
    Failed,
    /// A newer fetch was started after this one; the result was dropped.
    Stale,
}

#[derive(Debug)]
struct SceneAsteroid {
    handle: EntityHandle,
    entity: AsteroidEntity,
}

/// Materials shared by every asteroid of a hazard class.
#[derive(Debug, Clone)]
struct AsteroidMaterials {
    hazardous: MaterialDescriptor,
    safe: MaterialDescriptor,
}

impl AsteroidMaterials {
    fn new() -> Self {
        let glowing = |map: &'static str, hazard: HazardClass| MaterialDescriptor {
            emissive_map: Some(map),
            emissive_color: Some(hazard.glow()),
            ..MaterialDescriptor::textured("images/asteroid_texture.jpg")
        };
        Self {
            hazardous: glowing("images/red-glow.jpg", HazardClass::Hazardous),
            safe: glowing("images/green-glow.jpg", HazardClass::Safe),
        }
    }

    fn for_hazard(&self, hazard: HazardClass) -> &MaterialDescriptor {
        match hazard {
            HazardClass::Hazardous => &self.hazardous,
            HazardClass::Safe => &self.safe,
        }
    }
}

/// The asteroid scene.
pub struct SceneContext<R: RenderBackend, D: SummaryDisplay> {
    backend: R,
    display: D,
    policy: SceneConfig,
    placer: ShellPlacer,
    viewport: Viewport,
    backdrop: Backdrop,
    materials: AsteroidMaterials,
    asteroids: Vec<SceneAsteroid>,
    latest_generation: u64,
}

impl<R: RenderBackend, D: SummaryDisplay> SceneContext<R, D> {
    /// Build the scene and spawn the backdrop. No asteroids exist until the
    /// first fetch is applied.
    pub fn new(mut backend: R, display: D, policy: SceneConfig, viewport: Viewport) -> Self {
        let placer = ShellPlacer::from_optional_seed(policy.seed, policy.orbital_shell_radius);
        info!(
            seed = placer.seed(),
            shell_radius = placer.radius(),
            radius_policy = ?policy.radius_policy,
            diameter_policy = ?policy.diameter_policy,
            "scene created"
        );
        let backdrop = Backdrop::spawn(&mut backend);
        Self {
            backend,
            display,
            policy,
            placer,
            viewport,
            backdrop,
            materials: AsteroidMaterials::new(),
            asteroids: Vec::new(),
            latest_generation: 0,
        }
    }

    /// Issue the tag for a fetch that is about to start. Any result tagged
    /// with an earlier generation will be discarded.
    pub fn begin_fetch(&mut self) -> FetchGeneration {
        self.latest_generation += 1;
        FetchGeneration(self.latest_generation)
    }

    pub fn is_current(&self, generation: FetchGeneration) -> bool {
        generation.0 == self.latest_generation
    }

    /// Apply a completed fetch.
    ///
    /// A current success replaces the batch; a current failure is reported
    /// and leaves the scene untouched; a stale result of either kind is
    /// dropped silently.
    pub fn apply_fetch(
        &mut self,
        generation: FetchGeneration,
        result: Result<FeedBatch, FeedError>,
    ) -> ApplyOutcome {
        if !self.is_current(generation) {
            debug!(
                generation = generation.0,
                latest = self.latest_generation,
                "dropping stale fetch result"
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(batch) => {
                let count = self.replace_batch(&batch.records);
                self.display.show_count(count);
                ApplyOutcome::Applied {
                    count,
                    skipped: batch.skipped.len(),
                }
            }
            Err(FeedError::Validation(error)) => {
                self.reject_submission(&error);
                ApplyOutcome::Failed
            }
            Err(FeedError::Fetch(error)) => {
                warn!(%error, "fetch failed");
                self.display
                    .report_error(&format!("{FETCH_FAILED_MESSAGE} ({error})"));
                ApplyOutcome::Failed
            }
        }
    }

    /// Report a submission that failed validation. The fetch generation is
    /// untouched, so a fetch already in flight is still applied.
    pub fn reject_submission(&mut self, error: &ValidationError) {
        debug!(%error, "submission rejected");
        self.display.report_error(&error.to_string());
    }

    /// Replace every asteroid with entities built from `records`.
    ///
    /// The whole previous batch is removed and released before the first
    /// new entity is added.
    pub fn replace_batch(&mut self, records: &[AsteroidRecord]) -> usize {
        let entities = populate(records, &self.policy, &mut self.placer);
        self.clear_batch();

        for entity in entities {
            let geometry = GeometryDescriptor::Polyhedron {
                radius: entity.radius,
                detail: ASTEROID_DETAIL,
            };
            let material = self.materials.for_hazard(entity.hazard);
            let handle = self.backend.create_entity(&geometry, material);
            self.backend
                .set_transform(handle, entity.position, entity.rotation);
            self.backend.add(handle);
            self.asteroids.push(SceneAsteroid { handle, entity });
        }

        info!(count = self.asteroids.len(), "asteroid batch applied");
        self.asteroids.len()
    }

    /// Remove and release every asteroid.
    pub fn clear_batch(&mut self) {
        if self.asteroids.is_empty() {
            return;
        }
        for asteroid in self.asteroids.drain(..) {
            self.backend.remove(asteroid.handle);
            self.backend.release(asteroid.handle);
        }
        // A visible tooltip would describe an asteroid that no longer exists.
        self.display.hide_summary();
    }

    /// Per-frame step. Touches only scene state and the backend's transforms.
    pub fn advance(&mut self, dt: f32) {
        let spin = ASTEROID_SPIN_RATE * dt;
        for asteroid in &mut self.asteroids {
            asteroid.entity.rotation += Vec3::new(spin, spin, 0.0);
            self.backend.set_transform(
                asteroid.handle,
                asteroid.entity.position,
                asteroid.entity.rotation,
            );
        }
        self.backdrop.advance(dt, &mut self.backend);
    }

    pub fn render(&mut self) {
        self.backend.render_frame();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.width = width as f32;
        self.viewport.height = height as f32;
        self.backend.resize(width, height);
    }

    /// Swing the view around the origin; angles in radians.
    pub fn orbit_camera(&mut self, yaw: f32, pitch: f32) {
        self.backend.orbit_camera(yaw, pitch);
    }

    /// Asteroid under the pixel position `(px, py)`, if any.
    pub fn pick_at(&self, px: f32, py: f32) -> Option<&AsteroidEntity> {
        self.pick_asteroid(px, py).map(|a| &a.entity)
    }

    fn pick_asteroid(&self, px: f32, py: f32) -> Option<&SceneAsteroid> {
        let ndc = pointer_to_ndc(px, py, &self.viewport)?;
        let candidates: Vec<EntityHandle> = self.asteroids.iter().map(|a| a.handle).collect();
        let hit = self.backend.pick(ndc.x, ndc.y, &candidates)?;
        self.asteroids.iter().find(|a| a.handle == hit)
    }

    /// Hover: show the name of the asteroid under the pointer, or hide.
    pub fn pointer_move(&mut self, px: f32, py: f32) -> bool {
        self.show_pick(px, py, SummaryDetail::Short)
    }

    /// Click: show the full summary of the asteroid under the pointer, or hide.
    pub fn click(&mut self, px: f32, py: f32) -> bool {
        self.show_pick(px, py, SummaryDetail::Full)
    }

    /// Touch start: same as a click.
    pub fn touch_start(&mut self, px: f32, py: f32) -> bool {
        self.show_pick(px, py, SummaryDetail::Full)
    }

    fn show_pick(&mut self, px: f32, py: f32, detail: SummaryDetail) -> bool {
        match self
            .pick_asteroid(px, py)
            .map(|a| (a.handle, a.entity.summary()))
        {
            Some((handle, summary)) => {
                self.display.show_summary(handle, &summary, detail);
                true
            }
            None => {
                self.display.hide_summary();
                false
            }
        }
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn asteroids(&self) -> impl Iterator<Item = &AsteroidEntity> {
        self.asteroids.iter().map(|a| &a.entity)
    }

    pub fn asteroid_handles(&self) -> Vec<EntityHandle> {
        self.asteroids.iter().map(|a| a.handle).collect()
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn policy(&self) -> &SceneConfig {
        &self.policy
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.backend
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
