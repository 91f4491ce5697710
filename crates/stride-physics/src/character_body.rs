//! Kinematic character body using rapier3d's character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::debug;

use crate::PhysicsWorld;

/// Capsule and collision tuning for the character body
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
    /// Maximum ground snap distance, `None` disables snapping
    pub ground_snap_distance: Option<f32>,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            ground_snap_distance: Some(0.2),
        }
    }
}

/// Result of one collision-aware translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Translation actually applied after collision resolution
    pub translation: Vec3,
    /// Whether the body ended the move resting on a supporting surface
    pub grounded: bool,
}

/// Capsule body moved by explicit displacements, never by the solver
pub struct KinematicCharacter {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Feet position
    position: Vec3,
    /// Ground contact from the last move
    grounded: bool,
    collider_handle: Option<ColliderHandle>,
    controller: KinematicCharacterController,
}

impl KinematicCharacter {
    /// Create a new body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a new body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = config.ground_snap_distance.map(CharacterLength::Absolute);
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Insert the capsule into the world with its feet at `position`.
    ///
    /// Spawning an already spawned body moves its existing capsule.
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.grounded = false;

        if let Some(handle) = self.collider_handle {
            self.sync_collider(physics);
            debug!(?position, "character body respawned");
            return handle;
        }

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.colliders.insert(collider);
        self.collider_handle = Some(handle);
        debug!(?position, "character body spawned");
        handle
    }

    /// Translate by `desired_translation`, sliding along whatever is in the way
    pub fn move_by(
        &mut self,
        physics: &mut PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> MoveOutcome {
        let unmoved = MoveOutcome {
            translation: Vec3::ZERO,
            grounded: self.grounded,
        };
        let Some(collider_handle) = self.collider_handle else {
            return unmoved;
        };
        let Some(collider) = physics.colliders.get(collider_handle) else {
            return unmoved;
        };

        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.bodies,
            &physics.colliders,
            &physics.queries,
            collider.shape(),
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        let translation = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.grounded = movement.grounded;
        self.position += translation;
        self.sync_collider(physics);

        MoveOutcome {
            translation,
            grounded: self.grounded,
        }
    }

    /// Feet position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height / 2.0)
    }

    /// Check if standing on ground after the last move
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn sync_collider(&self, physics: &mut PhysicsWorld) {
        let Some(handle) = self.collider_handle else {
            return;
        };
        let center = self.center_position();
        if let Some(collider) = physics.colliders.get_mut(handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }
}

impl Default for KinematicCharacter {
    fn default() -> Self {
        Self::new()
    }
}
