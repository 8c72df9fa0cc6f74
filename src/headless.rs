//! In-memory scene
//!
//! Stands in for the rendering engine in tests and in the headless runner.
//! Bodies integrate with semi-implicit Euler and linear damping; nodes are
//! kept in a `BTreeMap` so iteration order is stable.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::scene::{FlySpawn, Kinematics, OverlayId, Scene, VisualHandle};

/// Physics body of a headless node
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub damping: f32,
    /// Force accumulated since the last step
    force: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct RotationAnim {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// A fly node
#[derive(Debug, Clone)]
pub struct Node {
    pub spawn: FlySpawn,
    pub body: Option<Body>,
    pub rotation: f32,
    anim: Option<RotationAnim>,
}

/// Scene that keeps everything in memory
#[derive(Debug, Default)]
pub struct HeadlessScene {
    nodes: BTreeMap<VisualHandle, Node>,
    next_handle: u32,
    /// Last text pushed to the score label
    pub score_text: String,
    /// Last opacity target per overlay
    pub overlays: BTreeMap<OverlayId, f32>,
    /// Tap points that triggered a repulsion effect
    pub repulsions: Vec<Vec2>,
    /// Handles destroyed so far, in order
    pub destroyed: Vec<VisualHandle>,
    /// Total `apply_force` calls that reached a body
    pub forces_applied: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: VisualHandle) -> Option<&Node> {
        self.nodes.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn handles(&self) -> impl Iterator<Item = VisualHandle> + '_ {
        self.nodes.keys().copied()
    }

    /// Teleport a body (test setup)
    pub fn place(&mut self, handle: VisualHandle, pos: Vec2) {
        if let Some(body) = self.nodes.get_mut(&handle).and_then(|n| n.body.as_mut()) {
            body.pos = pos;
        }
    }

    pub fn set_velocity(&mut self, handle: VisualHandle, vel: Vec2) {
        if let Some(body) = self.nodes.get_mut(&handle).and_then(|n| n.body.as_mut()) {
            body.vel = vel;
        }
    }

    /// Strip the physics body from a node, leaving the visual alive
    pub fn detach_body(&mut self, handle: VisualHandle) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.body = None;
        }
    }

    /// Advance physics and rotation animations by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for node in self.nodes.values_mut() {
            if let Some(body) = node.body.as_mut() {
                body.vel += body.force / body.mass * dt;
                body.vel /= 1.0 + body.damping * dt;
                body.pos += body.vel * dt;
                body.force = Vec2::ZERO;
            }

            if let Some(anim) = node.anim.as_mut() {
                anim.elapsed += dt;
                let t = (anim.elapsed / anim.duration).min(1.0);
                node.rotation = anim.from + (anim.to - anim.from) * t;
                if t >= 1.0 {
                    node.anim = None;
                }
            }
        }
    }
}

impl Scene for HeadlessScene {
    fn spawn_visual(&mut self, spawn: &FlySpawn) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        let body = Body {
            pos: spawn.position,
            vel: Vec2::ZERO,
            mass: spawn.mass,
            damping: spawn.damping,
            force: Vec2::ZERO,
        };
        self.nodes.insert(
            handle,
            Node {
                spawn: spawn.clone(),
                body: Some(body),
                rotation: spawn.rotation,
                anim: None,
            },
        );
        handle
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        if self.nodes.remove(&handle).is_some() {
            self.destroyed.push(handle);
        }
    }

    fn body(&self, handle: VisualHandle) -> Option<Kinematics> {
        let body = self.nodes.get(&handle)?.body.as_ref()?;
        Some(Kinematics {
            pos: body.pos,
            vel: body.vel,
        })
    }

    fn apply_force(&mut self, handle: VisualHandle, force: Vec2) {
        if let Some(body) = self.nodes.get_mut(&handle).and_then(|n| n.body.as_mut()) {
            body.force += force;
            self.forces_applied += 1;
        }
    }

    fn set_rotation(&mut self, handle: VisualHandle, angle: f32, duration: f32) {
        let Some(node) = self.nodes.get_mut(&handle) else {
            return;
        };
        if duration <= 0.0 {
            node.rotation = angle;
            node.anim = None;
        } else {
            node.anim = Some(RotationAnim {
                from: node.rotation,
                to: angle,
                duration,
                elapsed: 0.0,
            });
        }
    }

    fn repulse(&mut self, point: Vec2) {
        self.repulsions.push(point);
    }

    fn set_score_display(&mut self, text: &str) {
        self.score_text = text.to_string();
    }

    fn set_overlay_opacity(&mut self, overlay: OverlayId, opacity: f32, _duration: f32) {
        self.overlays.insert(overlay, opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_force_moves_body() {
        let mut scene = HeadlessScene::new();
        let handle = scene.spawn_visual(&Tuning::default().fly_prototype(Vec2::ZERO));
        scene.apply_force(handle, Vec2::new(1.0, 0.0));
        scene.step(1.0 / 60.0);

        let k = scene.body(handle).unwrap();
        assert!(k.vel.x > 0.0);
        assert!(k.pos.x > 0.0);
        assert_eq!(k.vel.y, 0.0);

        // Force is consumed by the step
        let vel_before = k.vel.x;
        scene.step(1.0 / 60.0);
        assert!(scene.body(handle).unwrap().vel.x < vel_before);
    }

    #[test]
    fn test_rotation_animates_over_duration() {
        let mut scene = HeadlessScene::new();
        let handle = scene.spawn_visual(&Tuning::default().fly_prototype(Vec2::ZERO));
        scene.set_rotation(handle, 0.4, 0.1);
        scene.step(0.05);
        let halfway = scene.node(handle).unwrap().rotation;
        assert!((halfway - 0.2).abs() < 1e-4);
        scene.step(0.1);
        assert!((scene.node(handle).unwrap().rotation - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_destroy_unknown_is_ignored() {
        let mut scene = HeadlessScene::new();
        scene.destroy_visual(VisualHandle(42));
        assert!(scene.destroyed.is_empty());
    }

    #[test]
    fn test_detached_body_reports_none() {
        let mut scene = HeadlessScene::new();
        let handle = scene.spawn_visual(&Tuning::default().fly_prototype(Vec2::ZERO));
        scene.detach_body(handle);
        assert!(scene.body(handle).is_none());
        scene.apply_force(handle, Vec2::ONE);
        assert_eq!(scene.forces_applied, 0);
        assert_eq!(scene.live_count(), 1);
    }
}
