//! Live fly registry
//!
//! Flies are stored in insertion order, which doubles as the hit-test and
//! steering iteration order.

use serde::{Deserialize, Serialize};

use crate::scene::{Kinematics, Scene, VisualHandle};

/// Unique fly identifier, never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlyId(pub u32);

/// A fly entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fly {
    pub id: FlyId,
    pub visual: VisualHandle,
    /// Mirrors the scene body as of the last `sync`; `None` without a body
    pub kinematics: Option<Kinematics>,
}

#[derive(Debug, Clone, Default)]
pub struct FlyRegistry {
    flies: Vec<Fly>,
    next_id: u32,
}

impl FlyRegistry {
    pub fn new() -> Self {
        Self {
            flies: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a fly for `visual` and return its id
    pub fn add(&mut self, visual: VisualHandle, kinematics: Option<Kinematics>) -> FlyId {
        let id = FlyId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.flies.push(Fly {
            id,
            visual,
            kinematics,
        });
        id
    }

    /// Remove a fly; removing an unknown id returns `None` and changes nothing
    pub fn remove(&mut self, id: FlyId) -> Option<Fly> {
        let idx = self.flies.iter().position(|f| f.id == id)?;
        Some(self.flies.remove(idx))
    }

    pub fn get(&self, id: FlyId) -> Option<&Fly> {
        self.flies.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FlyId) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.flies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fly> {
        self.flies.iter()
    }

    pub fn for_each(&self, f: impl FnMut(&Fly)) {
        self.flies.iter().for_each(f);
    }

    /// Remove every fly, returning them in insertion order
    pub fn drain(&mut self) -> Vec<Fly> {
        std::mem::take(&mut self.flies)
    }

    /// Refresh each fly's kinematics from its scene body
    pub fn sync<S: Scene + ?Sized>(&mut self, scene: &S) {
        for fly in &mut self.flies {
            fly.kinematics = scene.body(fly.visual);
        }
    }
}
