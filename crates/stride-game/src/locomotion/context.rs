//! Shared simulation state every locomotion state reads and mutates

use glam::{Vec2, Vec3};
use stride_core::TimerHandle;

use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::player::MovementConfig;

use super::jump_table::{JumpTable, MAX_JUMP_STAGE};

/// Discrete signals for animation and presentation binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationSignals {
    pub is_walking: bool,
    pub is_running: bool,
    pub is_jumping: bool,
    /// Current jump stage, 0 when grounded
    pub jump_count: u8,
}

/// Motion state shared by the whole state tree.
///
/// Jump count and gravity are only changed together through
/// [`MotionContext::enter_jump_stage`] and [`MotionContext::reset_jump_stage`],
/// so gravity always matches the table entry for the current stage. Applied
/// vertical velocity only changes through [`MotionContext::set_vertical_velocity`],
/// which clamps it to the terminal falling speed.
#[derive(Debug, Clone)]
pub struct MotionContext {
    /// Unscaled velocity the gait and gravity produce
    pub current_movement: Vec3,
    /// Velocity handed to the movement primitive this tick
    applied_movement: Vec3,
    /// Latest movement input
    pub movement_input: Vec2,
    pub is_movement_pressed: bool,
    pub is_run_pressed: bool,
    pub is_jump_pressed: bool,
    /// Edge-trigger lock: a held jump cannot trigger another jump until released
    pub require_new_jump_press: bool,
    /// Set by the jump timer once the current stage may chain into the next
    pub stage_advance_ready: bool,
    /// Ground contact reported by the host for this tick
    pub is_grounded: bool,
    /// Pending jump reset timer, at most one
    pub jump_reset: Option<TimerHandle>,
    pub signals: AnimationSignals,
    config: MovementConfig,
    table: JumpTable,
    jump_count: u8,
    gravity: f32,
}

impl MotionContext {
    /// Create a context at rest on the ground
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = JumpTable::from_config(&config)?;
        let gravity = table.base_gravity();

        Ok(Self {
            current_movement: Vec3::ZERO,
            applied_movement: Vec3::ZERO,
            movement_input: Vec2::ZERO,
            is_movement_pressed: false,
            is_run_pressed: false,
            is_jump_pressed: false,
            require_new_jump_press: false,
            stage_advance_ready: false,
            is_grounded: false,
            jump_reset: None,
            signals: AnimationSignals::default(),
            config,
            table,
            jump_count: 0,
            gravity,
        })
    }

    /// Copy an input snapshot into the flags. A jump release clears the edge-trigger lock.
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        let released = input.jump_released || (self.is_jump_pressed && !input.jump_pressed);

        self.movement_input = input.movement;
        self.is_movement_pressed = input.is_movement_pressed();
        self.is_run_pressed = input.run_pressed;
        self.is_jump_pressed = input.jump_pressed;
        if released {
            self.require_new_jump_press = false;
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.table
    }

    /// Current jump stage, 0 when grounded
    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    /// Gravity for the current jump stage
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Gravity applied while grounded
    pub fn base_gravity(&self) -> f32 {
        self.table.base_gravity()
    }

    pub fn applied_movement(&self) -> Vec3 {
        self.applied_movement
    }

    /// Vertical velocity held while resting on the ground
    pub fn resting_vertical_velocity(&self) -> f32 {
        self.clamp_fall(self.base_gravity())
    }

    /// Advance to the next jump stage (saturating) and return it
    pub fn enter_jump_stage(&mut self) -> u8 {
        self.jump_count = (self.jump_count + 1).min(MAX_JUMP_STAGE);
        self.gravity = self.table.gravity(self.jump_count);
        self.signals.jump_count = self.jump_count;
        self.jump_count
    }

    /// Return to stage 0 and base gravity
    pub fn reset_jump_stage(&mut self) {
        self.jump_count = 0;
        self.gravity = self.table.base_gravity();
        self.signals.jump_count = 0;
    }

    /// Set current and applied vertical velocity; applied never falls faster than terminal speed
    pub fn set_vertical_velocity(&mut self, current: f32, applied: f32) {
        self.current_movement.y = current;
        self.applied_movement.y = self.clamp_fall(applied);
    }

    /// Set the horizontal components of the applied velocity
    pub fn set_horizontal_velocity(&mut self, x: f32, z: f32) {
        self.current_movement.x = x;
        self.current_movement.z = z;
        self.applied_movement.x = x;
        self.applied_movement.z = z;
    }

    fn clamp_fall(&self, vertical: f32) -> f32 {
        vertical.max(self.config.max_falling_speed)
    }
}
