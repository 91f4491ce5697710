//! Hierarchical locomotion state machine
//!
//! Grounded and Jumping are the two root states. Grounded owns the Idle, Walk
//! and Run sub-states; Jumping chains up to three stages, each bounded by a
//! cancellable reset timer.

mod context;
mod factory;
mod host;
mod integrator;
mod jump_table;
mod jump_timer;
mod machine;
mod state;
mod states;
#[cfg(test)]
mod test_support;

pub use context::{AnimationSignals, MotionContext};
pub use factory::{StateFactory, StateNode};
pub use host::{GroundContact, MovementPrimitive};
pub use jump_table::{JumpStage, JumpTable, MAX_JUMP_STAGE};
pub use jump_timer::JumpTimerEvent;
pub use machine::PlayerStateMachine;
pub use state::StateId;
