//! Stride Physics - Collision world for the locomotion core using rapier3d
//!
//! Holds the static level the character walks on and the kinematic
//! character body that performs collision-aware translation. Nothing here
//! is solver-driven: the body only moves when the locomotion step asks.

mod character_body;

pub use character_body::{CharacterBodyConfig, KinematicCharacter, MoveOutcome};

use nalgebra::Unit;
use rapier3d::prelude::*;

/// Static level geometry plus the query structure shape casts run against
pub struct PhysicsWorld {
    /// Always empty; rapier's character queries still take a body set
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    pub(crate) queries: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            queries: QueryPipeline::new(),
        }
    }

    /// Rebuild the query structure from the current collider positions.
    ///
    /// Call after adding level geometry and after each locomotion tick.
    pub fn refresh_queries(&mut self) {
        self.queries.update(&self.colliders);
    }

    /// Add a flat ground plane at height `y` facing up
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let up = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(up)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .build();
        self.colliders.insert(ground)
    }

    /// Number of colliders in the world, character capsule included
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
