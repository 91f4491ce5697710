//! Player controller driving the locomotion state machine against rapier

use glam::{Quat, Vec3};
use stride_physics::{KinematicCharacter, PhysicsWorld};

use crate::error::ConfigError;
use crate::input::InputState;
use crate::locomotion::{
    AnimationSignals, GroundContact, MovementPrimitive, PlayerStateMachine, StateId,
};

use super::MovementConfig;

/// Borrowed view of the character body inside its physics world for one tick
struct RapierBody<'a> {
    character: &'a mut KinematicCharacter,
    physics: &'a mut PhysicsWorld,
}

impl GroundContact for RapierBody<'_> {
    fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }
}

impl MovementPrimitive for RapierBody<'_> {
    fn move_by(&mut self, displacement: Vec3, dt: f32) {
        self.character.move_by(self.physics, displacement, dt);
    }
}

/// Player controller owning the state machine and the character body
pub struct PlayerController {
    /// Locomotion state machine
    pub machine: PlayerStateMachine,
    /// Physics character body
    pub character: KinematicCharacter,
}

impl PlayerController {
    /// Create a player controller with default tuning
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(MovementConfig::default())
    }

    /// Create a player controller with custom tuning
    pub fn with_config(config: MovementConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            machine: PlayerStateMachine::new(config)?,
            character: KinematicCharacter::new(),
        })
    }

    /// Spawn the player in the world at a position
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.spawn(physics, position);
    }

    /// Advance locomotion by one fixed step
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        input: &InputState,
        camera_yaw: f32,
        dt: f32,
    ) -> Vec3 {
        let mut body = RapierBody {
            character: &mut self.character,
            physics,
        };
        self.machine.tick(&input.snapshot(), camera_yaw, dt, &mut body)
    }

    /// Get the player's feet position
    pub fn position(&self) -> Vec3 {
        self.character.position()
    }

    /// Get the player's facing
    pub fn rotation(&self) -> Quat {
        self.machine.rotation()
    }

    /// Check if the body touched the ground on its last move
    pub fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    /// Active root state
    pub fn state(&self) -> StateId {
        self.machine.current_state()
    }

    /// Signals for animation binding
    pub fn signals(&self) -> AnimationSignals {
        self.machine.signals()
    }
}
