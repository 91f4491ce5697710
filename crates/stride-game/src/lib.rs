//! Stride Game - Player locomotion logic
//!
//! Provides the input snapshot adapter, movement tuning, and the hierarchical
//! locomotion state machine (grounded/jumping super-states with idle, walk and
//! run sub-states) together with its per-tick integrator.

pub mod error;
pub mod input;
pub mod locomotion;
pub mod player;

pub use error::ConfigError;
pub use input::{InputAction, InputSnapshot, InputState};
pub use locomotion::{
    AnimationSignals, GroundContact, JumpTable, JumpTimerEvent, MotionContext, MovementPrimitive,
    PlayerStateMachine, StateFactory, StateId, MAX_JUMP_STAGE,
};
pub use player::{MovementConfig, PlayerController};
