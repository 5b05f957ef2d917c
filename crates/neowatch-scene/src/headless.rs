//! In-memory scene graph implementing [`RenderBackend`].
//!
//! Keeps every object's transform and bounding sphere so picking works
//! without a GPU, and records each scene mutation as a [`SceneEvent`].
//! `render_frame` only counts frames.

use glam::Vec3;
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::backend::{
    EntityHandle, GeometryDescriptor, LightDescriptor, MaterialDescriptor, RenderBackend,
};
use crate::camera::Camera;

/// A mutation observed by the scene graph, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Created(EntityHandle),
    Added(EntityHandle),
    Removed(EntityHandle),
    Released(EntityHandle),
}

#[derive(Debug, Clone)]
struct Node {
    geometry: GeometryDescriptor,
    material: MaterialDescriptor,
    position: Vec3,
    rotation: Vec3,
    in_scene: bool,
}

/// Scene graph without a GPU.
pub struct HeadlessScene {
    camera: Camera,
    nodes: FxHashMap<EntityHandle, Node>,
    lights: Vec<LightDescriptor>,
    next_id: u64,
    events: Vec<SceneEvent>,
    frame_count: u64,
}

impl HeadlessScene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            nodes: FxHashMap::default(),
            lights: Vec::new(),
            next_id: 1,
            events: Vec::new(),
            frame_count: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Every mutation since construction or the last [`take_events`](Self::take_events).
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn lights(&self) -> &[LightDescriptor] {
        &self.lights
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Objects currently allocated (visible or not).
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// Objects currently in the visible scene.
    pub fn visible_count(&self) -> usize {
        self.nodes.values().filter(|n| n.in_scene).count()
    }

    pub fn is_visible(&self, handle: EntityHandle) -> bool {
        self.nodes.get(&handle).is_some_and(|n| n.in_scene)
    }

    pub fn position(&self, handle: EntityHandle) -> Option<Vec3> {
        self.nodes.get(&handle).map(|n| n.position)
    }

    pub fn rotation(&self, handle: EntityHandle) -> Option<Vec3> {
        self.nodes.get(&handle).map(|n| n.rotation)
    }

    pub fn material(&self, handle: EntityHandle) -> Option<&MaterialDescriptor> {
        self.nodes.get(&handle).map(|n| &n.material)
    }

    pub fn geometry(&self, handle: EntityHandle) -> Option<&GeometryDescriptor> {
        self.nodes.get(&handle).map(|n| &n.geometry)
    }

    fn node_mut(&mut self, handle: EntityHandle, op: &str) -> Option<&mut Node> {
        let node = self.nodes.get_mut(&handle);
        if node.is_none() {
            warn!(?handle, op, "unknown scene handle");
        }
        node
    }
}

impl RenderBackend for HeadlessScene {
    fn create_entity(
        &mut self,
        geometry: &GeometryDescriptor,
        material: &MaterialDescriptor,
    ) -> EntityHandle {
        let handle = EntityHandle(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            handle,
            Node {
                geometry: geometry.clone(),
                material: material.clone(),
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                in_scene: false,
            },
        );
        self.events.push(SceneEvent::Created(handle));
        handle
    }

    fn add(&mut self, handle: EntityHandle) {
        if let Some(node) = self.node_mut(handle, "add")
            && !node.in_scene
        {
            node.in_scene = true;
            self.events.push(SceneEvent::Added(handle));
        }
    }

    fn remove(&mut self, handle: EntityHandle) {
        if let Some(node) = self.node_mut(handle, "remove")
            && node.in_scene
        {
            node.in_scene = false;
            self.events.push(SceneEvent::Removed(handle));
        }
    }

    fn release(&mut self, handle: EntityHandle) {
        match self.nodes.remove(&handle) {
            Some(node) => {
                if node.in_scene {
                    self.events.push(SceneEvent::Removed(handle));
                }
                self.events.push(SceneEvent::Released(handle));
            }
            None => warn!(?handle, "release of unknown scene handle"),
        }
    }

    fn set_transform(&mut self, handle: EntityHandle, position: Vec3, rotation: Vec3) {
        if let Some(node) = self.node_mut(handle, "set_transform") {
            node.position = position;
            node.rotation = rotation;
        }
    }

    fn add_light(&mut self, light: &LightDescriptor) {
        self.lights.push(light.clone());
    }

    fn orbit_camera(&mut self, yaw: f32, pitch: f32) {
        self.camera.orbit(yaw, pitch);
    }

    fn pick(&self, ndc_x: f32, ndc_y: f32, candidates: &[EntityHandle]) -> Option<EntityHandle> {
        let ray = self.camera.ray_from_ndc(ndc_x, ndc_y);
        candidates
            .iter()
            .filter_map(|&handle| {
                let node = self.nodes.get(&handle).filter(|n| n.in_scene)?;
                let t = ray.intersect_sphere(node.position, node.geometry.bounding_radius())?;
                Some((handle, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
    }

    fn render_frame(&mut self) {
        self.frame_count += 1;
        trace!(frame = self.frame_count, visible = self.visible_count(), "frame");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(radius: f32) -> GeometryDescriptor {
        GeometryDescriptor::Sphere {
            radius,
            segments: 8,
        }
    }

    fn scene() -> HeadlessScene {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 40.0);
        HeadlessScene::new(camera)
    }

    #[test]
    fn test_lifecycle_events() {
        let mut scene = scene();
        let material = MaterialDescriptor::textured("rock.jpg");
        let h = scene.create_entity(&ball(1.0), &material);
        scene.add(h);
        scene.add(h);
        scene.remove(h);
        scene.release(h);

        assert_eq!(
            scene.events(),
            [
                SceneEvent::Created(h),
                SceneEvent::Added(h),
                SceneEvent::Removed(h),
                SceneEvent::Released(h),
            ]
        );
        assert_eq!(scene.live_count(), 0);
    }

    #[test]
    fn test_release_while_visible_removes_first() {
        let mut scene = scene();
        let h = scene.create_entity(&ball(1.0), &MaterialDescriptor::textured("a"));
        scene.add(h);
        scene.take_events();
        scene.release(h);
        assert_eq!(
            scene.events(),
            [SceneEvent::Removed(h), SceneEvent::Released(h)]
        );
    }

    #[test]
    fn test_pick_nearest_visible_candidate() {
        let mut scene = scene();
        let material = MaterialDescriptor::textured("a");
        let far = scene.create_entity(&ball(1.0), &material);
        let near = scene.create_entity(&ball(1.0), &material);
        let hidden = scene.create_entity(&ball(5.0), &material);
        scene.set_transform(far, Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        scene.set_transform(near, Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        scene.set_transform(hidden, Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        scene.add(far);
        scene.add(near);

        let all = [far, near, hidden];
        assert_eq!(scene.pick(0.0, 0.0, &all), Some(near));
        assert_eq!(scene.pick(0.0, 0.0, &[far]), Some(far));
        assert_eq!(scene.pick(0.9, 0.9, &all), None);
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let mut scene = scene();
        scene.add(EntityHandle(42));
        scene.release(EntityHandle(42));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut scene = scene();
        scene.resize(1000, 500);
        assert_eq!(scene.camera().aspect_ratio, 2.0);
        scene.resize(0, 500);
        assert_eq!(scene.camera().aspect_ratio, 2.0);
    }

    #[test]
    fn test_orbit_camera_changes_pick_result() {
        let mut scene = scene();
        let h = scene.create_entity(&ball(1.0), &MaterialDescriptor::textured("a"));
        scene.set_transform(h, Vec3::new(14.0, 0.0, 0.0), Vec3::ZERO);
        scene.add(h);
        assert_eq!(scene.pick(0.0, 0.0, &[h]), None);

        scene.orbit_camera(std::f32::consts::FRAC_PI_2, 0.0);
        assert_eq!(scene.pick(0.0, 0.0, &[h]), Some(h));
    }

    #[test]
    fn test_render_frame_counts() {
        let mut scene = scene();
        scene.render_frame();
        scene.render_frame();
        assert_eq!(scene.frame_count(), 2);
    }
}
