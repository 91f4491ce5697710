//! Player controller module
//!
//! Couples the locomotion state machine to a rapier character body.

mod controller;
mod movement;

pub use controller::PlayerController;
pub use movement::MovementConfig;
