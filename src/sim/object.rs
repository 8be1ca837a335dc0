//! Movable, orientable game entities
//!
//! A `GameObject` owns at most one scene-side `Representation` and pushes
//! every visible change to it immediately (no batching).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Quat, Vec3};

use crate::consts::{DEFAULT_VELOCITY, LAUNCH_HEADING};
use crate::math::{heading_direction, rotate};

/// Scene-host side of a game object (a renderable entity)
pub trait Representation: Send {
    /// Show or hide
    fn set_enabled(&mut self, enabled: bool);
    /// World-space position
    fn set_position(&mut self, position: Vec3);
    /// World-space orientation
    fn set_rotation(&mut self, rotation: Quat);
    /// Uniform scale
    fn set_scale(&mut self, scale: f32);
    /// Remove from the scene. Called at most once.
    fn detach(&mut self);
}

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Initial Euler rotation (degrees) of every object
const INITIAL_ROTATION: Vec3 = Vec3::new(0.0, 90.0, 0.0);

/// A game entity moving on the horizontal plane
pub struct GameObject {
    id: u64,
    tag: i32,
    position: Vec3,
    /// Euler rotation in degrees, applied as X * Y * Z
    rotation: Vec3,
    scale: f32,
    /// Units per second
    velocity: f32,
    /// Direction of travel in degrees, never wrapped
    heading: f32,
    active: bool,
    representation: Option<Box<dyn Representation>>,
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("velocity", &self.velocity)
            .field("heading", &self.heading)
            .field("active", &self.active)
            .field("attached", &self.representation.is_some())
            .finish()
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObject {
    /// Create an object with no scene representation
    pub fn new() -> Self {
        Self {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            tag: 0,
            position: Vec3::ZERO,
            rotation: INITIAL_ROTATION,
            scale: 1.0,
            velocity: 0.0,
            heading: 0.0,
            active: true,
            representation: None,
        }
    }

    /// Create an object that mirrors its state onto `representation`
    pub fn with_representation(representation: Box<dyn Representation>) -> Self {
        let mut object = Self::new();
        object.attach(representation);
        object
    }

    /// Take ownership of a representation and sync it to the current state.
    ///
    /// A previously attached representation is released first.
    pub fn attach(&mut self, representation: Box<dyn Representation>) {
        self.release();
        self.representation = Some(representation);
        let (position, rotation, scale, active) =
            (self.position, self.rotation_quat(), self.scale, self.active);
        if let Some(repr) = self.representation.as_mut() {
            repr.set_position(position);
            repr.set_rotation(rotation);
            repr.set_scale(scale);
            repr.set_enabled(active);
        }
    }

    /// Process-unique id, increasing in creation order
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        if let Some(repr) = self.representation.as_mut() {
            repr.set_position(position);
        }
    }

    /// Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Orientation sent to the representation
    pub fn rotation_quat(&self) -> Quat {
        rotate(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        let quat = self.rotation_quat();
        if let Some(repr) = self.representation.as_mut() {
            repr.set_rotation(quat);
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        if let Some(repr) = self.representation.as_mut() {
            repr.set_scale(scale);
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Heading in degrees. Not wrapped; see `math::normalize_heading`.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Set an absolute heading
    pub fn set_heading(&mut self, degrees: f32) {
        self.heading = degrees;
    }

    /// Turn by `delta` degrees
    pub fn adjust_heading(&mut self, delta: f32) {
        self.heading += delta;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the object; the representation is shown/hidden to match
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if let Some(repr) = self.representation.as_mut() {
            repr.set_enabled(active);
        }
    }

    /// Make the object active again after a round
    pub fn reset(&mut self) {
        self.set_active(true);
    }

    pub fn has_representation(&self) -> bool {
        self.representation.is_some()
    }

    /// Launch: default velocity, heading along -z
    pub fn start_flying(&mut self) {
        self.velocity = DEFAULT_VELOCITY;
        self.set_heading(LAUNCH_HEADING);
    }

    /// Launch with custom velocity and heading
    pub fn start_flying_with(&mut self, velocity: f32, heading: f32) {
        self.velocity = velocity;
        self.set_heading(heading);
    }

    /// Advance one simulation step.
    ///
    /// Moves on the XZ plane only; y is untouched. The visual yaw is
    /// `-(heading - 90)` to map the math frame onto the render frame.
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        let step = self.velocity * dt;
        let dir = heading_direction(self.heading);
        let mut position = self.position;
        position.x += step * dir.x;
        position.z += step * dir.y;
        self.set_position(position);

        let mut rotation = self.rotation;
        rotation.y = -(self.heading - 90.0);
        self.set_rotation(rotation);
    }

    /// Detach the representation from the scene. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(mut repr) = self.representation.take() {
            repr.detach();
            log::debug!("Game object '{}' removed from scene", self.id);
        }
    }
}

impl Drop for GameObject {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use std::sync::{Arc, Mutex};

    /// Calls recorded by `RecordingRepresentation`
    #[derive(Debug, Clone, PartialEq)]
    pub enum SceneCall {
        Enabled(bool),
        Position(Vec3),
        Rotation(Quat),
        Scale(f32),
        Detach,
    }

    /// Test double that records every call from its object
    #[derive(Clone, Default)]
    pub struct RecordingRepresentation {
        pub calls: Arc<Mutex<Vec<SceneCall>>>,
    }

    impl RecordingRepresentation {
        pub fn calls(&self) -> Vec<SceneCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
    }

    impl Representation for RecordingRepresentation {
        fn set_enabled(&mut self, enabled: bool) {
            self.calls.lock().unwrap().push(SceneCall::Enabled(enabled));
        }
        fn set_position(&mut self, position: Vec3) {
            self.calls.lock().unwrap().push(SceneCall::Position(position));
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.calls.lock().unwrap().push(SceneCall::Rotation(rotation));
        }
        fn set_scale(&mut self, scale: f32) {
            self.calls.lock().unwrap().push(SceneCall::Scale(scale));
        }
        fn detach(&mut self) {
            self.calls.lock().unwrap().push(SceneCall::Detach);
        }
    }

    #[test]
    fn test_ids_increase() {
        let a = GameObject::new();
        let b = GameObject::new();
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_one_second_of_flight() {
        let mut plane = GameObject::new();
        plane.start_flying();
        assert_eq!(plane.velocity(), 0.2);
        assert_eq!(plane.heading(), -90.0);

        for _ in 0..60 {
            plane.advance(SIM_DT);
        }
        let p = plane.position();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -0.2), 1e-5), "ended at {p}");
    }

    #[test]
    fn test_advance_keeps_height() {
        let mut plane = GameObject::new();
        plane.set_position(Vec3::new(1.0, 1.5, 2.0));
        plane.start_flying_with(1.0, 0.0);
        plane.advance(0.5);
        assert!(plane.position().abs_diff_eq(Vec3::new(1.5, 1.5, 2.0), 1e-6));
    }

    #[test]
    fn test_advance_sets_visual_yaw() {
        let mut plane = GameObject::new();
        assert_eq!(plane.rotation(), Vec3::new(0.0, 90.0, 0.0));
        plane.start_flying();
        plane.advance(SIM_DT);
        assert_eq!(plane.rotation().y, 180.0);

        plane.set_heading(30.0);
        plane.advance(SIM_DT);
        assert_eq!(plane.rotation().y, 60.0);
    }

    #[test]
    fn test_inactive_object_does_not_move() {
        let mut plane = GameObject::new();
        plane.start_flying();
        plane.set_active(false);
        plane.advance(1.0);
        assert_eq!(plane.position(), Vec3::ZERO);
    }

    #[test]
    fn test_heading_is_not_wrapped() {
        let mut plane = GameObject::new();
        plane.set_heading(350.0);
        plane.adjust_heading(20.0);
        assert_eq!(plane.heading(), 370.0);
        plane.set_heading(-10.0);
        plane.adjust_heading(-400.0);
        assert_eq!(plane.heading(), -410.0);
    }

    #[test]
    fn test_set_active_mirrors_visibility() {
        let repr = RecordingRepresentation::default();
        let mut plane = GameObject::with_representation(Box::new(repr.clone()));
        repr.clear();

        plane.set_active(false);
        assert!(!plane.is_active());
        plane.set_active(true);
        assert!(plane.is_active());
        assert_eq!(repr.calls(), vec![SceneCall::Enabled(false), SceneCall::Enabled(true)]);
    }

    #[test]
    fn test_attach_syncs_state() {
        let repr = RecordingRepresentation::default();
        let mut plane = GameObject::new();
        plane.set_position(Vec3::new(0.0, 1.0, -1.0));
        plane.set_scale(2.0);
        plane.attach(Box::new(repr.clone()));

        let calls = repr.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], SceneCall::Position(Vec3::new(0.0, 1.0, -1.0)));
        assert_eq!(calls[2], SceneCall::Scale(2.0));
        assert_eq!(calls[3], SceneCall::Enabled(true));
    }

    #[test]
    fn test_advance_pushes_transform() {
        let repr = RecordingRepresentation::default();
        let mut plane = GameObject::with_representation(Box::new(repr.clone()));
        plane.start_flying();
        repr.clear();

        plane.advance(SIM_DT);
        let calls = repr.calls();
        assert!(matches!(calls[0], SceneCall::Position(_)));
        match calls[1] {
            SceneCall::Rotation(q) => assert!(q.abs_diff_eq(rotate(0.0, 180.0, 0.0), 1e-6)),
            ref other => panic!("expected rotation, got {other:?}"),
        }
    }

    #[test]
    fn test_release_is_idempotent() {
        let repr = RecordingRepresentation::default();
        let mut plane = GameObject::with_representation(Box::new(repr.clone()));
        repr.clear();

        plane.release();
        plane.release();
        assert!(!plane.has_representation());
        assert_eq!(repr.calls(), vec![SceneCall::Detach]);

        // Setters after release do not reach the scene
        plane.set_active(false);
        drop(plane);
        assert_eq!(repr.calls(), vec![SceneCall::Detach]);
    }
}
