//! Per-stage jump physics derived from the designer's height and airtime

use crate::error::ConfigError;
use crate::player::MovementConfig;

/// Highest jump stage; chaining saturates here
pub const MAX_JUMP_STAGE: u8 = 3;

/// Extra apex height per stage on top of the base jump height
const STAGE_HEIGHT_OFFSETS: [f32; 3] = [0.0, 2.0, 4.0];
/// Airtime multiplier per stage applied to the base jump time
const STAGE_TIME_SCALES: [f32; 3] = [1.0, 1.25, 1.5];

/// Physics of one jump stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpStage {
    /// Target apex height in meters
    pub apex_height: f32,
    /// Total airtime in seconds (apex is reached at half of it)
    pub airtime: f32,
    /// Gravity while in this stage (negative)
    pub gravity: f32,
    /// Upward velocity at stage entry
    pub initial_velocity: f32,
}

impl JumpStage {
    fn derive(apex_height: f32, airtime: f32) -> Self {
        let time_to_apex = airtime / 2.0;
        Self {
            apex_height,
            airtime,
            gravity: (-2.0 * apex_height) / time_to_apex.powi(2),
            initial_velocity: (2.0 * apex_height) / time_to_apex,
        }
    }

    /// Height reached `t` seconds after entering the stage
    pub fn displacement_at(&self, t: f32) -> f32 {
        self.initial_velocity * t + 0.5 * self.gravity * t * t
    }
}

/// Gravity and launch velocity for stages 0..=3, immutable once built.
///
/// Stage 0 is the grounded stage: it carries the base gravity and no launch
/// velocity. Stage 1 shares the base gravity by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpTable {
    stages: [JumpStage; MAX_JUMP_STAGE as usize],
}

impl JumpTable {
    /// Derive the table from the first stage's apex height and airtime
    pub fn new(max_jump_height: f32, max_jump_time: f32) -> Result<Self, ConfigError> {
        if !max_jump_height.is_finite() || max_jump_height <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_jump_height",
                value: max_jump_height,
            });
        }
        if !max_jump_time.is_finite() || max_jump_time <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_jump_time",
                value: max_jump_time,
            });
        }

        let stages = std::array::from_fn(|i| {
            JumpStage::derive(
                max_jump_height + STAGE_HEIGHT_OFFSETS[i],
                max_jump_time * STAGE_TIME_SCALES[i],
            )
        });
        Ok(Self { stages })
    }

    /// Build the table from movement tuning
    pub fn from_config(config: &MovementConfig) -> Result<Self, ConfigError> {
        Self::new(config.max_jump_height, config.max_jump_time)
    }

    /// Stage parameters; stage 0 reports the first stage's arc
    pub fn stage(&self, stage: u8) -> &JumpStage {
        let index = stage.clamp(1, MAX_JUMP_STAGE) - 1;
        &self.stages[usize::from(index)]
    }

    /// Gravity for a stage (0 = grounded)
    pub fn gravity(&self, stage: u8) -> f32 {
        self.stage(stage).gravity
    }

    /// Gravity applied while grounded
    pub fn base_gravity(&self) -> f32 {
        self.gravity(0)
    }

    /// Launch velocity for a stage; grounded has none
    pub fn initial_velocity(&self, stage: u8) -> f32 {
        if stage == 0 {
            0.0
        } else {
            self.stage(stage).initial_velocity
        }
    }

    /// Total airtime of a stage
    pub fn airtime(&self, stage: u8) -> f32 {
        self.stage(stage).airtime
    }
}
