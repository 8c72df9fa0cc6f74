//! Rendering/platform collaborator seam
//!
//! The simulation never draws, plays sound or integrates physics itself. It
//! asks a [`Scene`] to create and destroy fly visuals, to push forces into
//! their physics bodies, and to show score and overlays.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque reference to a scene node created by [`Scene::spawn_visual`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// Position and velocity of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Prototype descriptor for a fresh fly node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlySpawn {
    pub position: Vec2,
    pub rotation: f32,
    pub opacity: f32,
    pub body_radius: f32,
    pub mass: f32,
    /// Linear damping of the physics body
    pub damping: f32,
    /// Attach the particle trail
    pub trail: bool,
    /// Attach the looping buzz sound
    pub buzz: bool,
}

/// Full-screen overlays cross-faded by phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OverlayId {
    Title,
    GameOver,
}

/// Rendering/physics/presentation collaborator
pub trait Scene {
    /// Create a drawable, physics-backed node for a fly
    fn spawn_visual(&mut self, spawn: &FlySpawn) -> VisualHandle;

    /// Destroy a node; unknown handles are ignored
    fn destroy_visual(&mut self, handle: VisualHandle);

    /// Current physics state, `None` if the node has no body
    fn body(&self, handle: VisualHandle) -> Option<Kinematics>;

    fn apply_force(&mut self, handle: VisualHandle, force: Vec2);

    /// Animate the node's rotation toward `angle` over `duration` seconds
    fn set_rotation(&mut self, handle: VisualHandle, angle: f32, duration: f32);

    /// Transient push-away effect at a tap point (visual only)
    fn repulse(&mut self, point: Vec2);

    fn set_score_display(&mut self, text: &str);

    fn set_overlay_opacity(&mut self, overlay: OverlayId, opacity: f32, duration: f32);
}

/// Scene that renders nothing and has no physics
#[derive(Debug, Default)]
pub struct NullScene {
    next_handle: u32,
}

impl Scene for NullScene {
    fn spawn_visual(&mut self, _spawn: &FlySpawn) -> VisualHandle {
        self.next_handle += 1;
        VisualHandle(self.next_handle)
    }

    fn destroy_visual(&mut self, _handle: VisualHandle) {}

    fn body(&self, _handle: VisualHandle) -> Option<Kinematics> {
        None
    }

    fn apply_force(&mut self, _handle: VisualHandle, _force: Vec2) {}

    fn set_rotation(&mut self, _handle: VisualHandle, _angle: f32, _duration: f32) {}

    fn repulse(&mut self, _point: Vec2) {}

    fn set_score_display(&mut self, _text: &str) {}

    fn set_overlay_opacity(&mut self, _overlay: OverlayId, _opacity: f32, _duration: f32) {}
}
