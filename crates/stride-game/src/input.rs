//! Action-based input state and the per-tick snapshot the locomotion core reads
//!
//! Raw device capture stays with the host; it reports presses and releases
//! per action and the state machine only ever sees an [`InputSnapshot`].

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Locomotion actions a host can bind physical inputs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (+Y on the movement axis)
    MoveForward,
    /// Move backward (-Y on the movement axis)
    MoveBackward,
    /// Strafe left (-X on the movement axis)
    MoveLeft,
    /// Strafe right (+X on the movement axis)
    MoveRight,
    /// Jump
    Jump,
    /// Run modifier
    Run,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press event
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Record a release event
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Movement axis from the four directional actions, normalized on diagonals
    pub fn movement_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.is_held(InputAction::MoveForward) {
            axis.y += 1.0;
        }
        if self.is_held(InputAction::MoveBackward) {
            axis.y -= 1.0;
        }
        if self.is_held(InputAction::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axis.x += 1.0;
        }
        axis.normalize_or_zero()
    }

    /// Build the snapshot handed to the state machine for this tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            movement: self.movement_axis(),
            run_pressed: self.is_held(InputAction::Run),
            jump_pressed: self.is_held(InputAction::Jump),
            jump_released: self.is_just_released(InputAction::Jump),
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Input signals consumed by one locomotion tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement vector, zero when released
    pub movement: Vec2,
    /// Run modifier held
    pub run_pressed: bool,
    /// Jump held
    pub jump_pressed: bool,
    /// Jump was released since the previous tick
    pub jump_released: bool,
}

impl InputSnapshot {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot with the given movement vector
    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    /// Set the run modifier
    pub fn with_run(mut self, run_pressed: bool) -> Self {
        self.run_pressed = run_pressed;
        self
    }

    /// Set the jump button
    pub fn with_jump(mut self, jump_pressed: bool) -> Self {
        self.jump_pressed = jump_pressed;
        self
    }

    /// Mark a jump release event on this tick
    pub fn with_jump_released(mut self) -> Self {
        self.jump_pressed = false;
        self.jump_released = true;
        self
    }

    /// Whether any movement is requested
    pub fn is_movement_pressed(&self) -> bool {
        self.movement != Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_edges() {
        let mut state = InputState::new();
        state.press(InputAction::Jump);
        state.press(InputAction::Jump);

        assert!(state.is_held(InputAction::Jump));
        assert!(state.is_just_pressed(InputAction::Jump));

        state.clear_frame();
        assert!(state.is_held(InputAction::Jump));
        assert!(!state.is_just_pressed(InputAction::Jump));

        state.release(InputAction::Jump);
        assert!(!state.is_held(InputAction::Jump));
        assert!(state.is_just_released(InputAction::Jump));
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = InputState::new();
        state.press(InputAction::MoveForward);
        state.press(InputAction::MoveRight);

        let axis = state.movement_axis();
        assert!((axis.length() - 1.0).abs() < 1e-6);
        assert!(axis.x > 0.0 && axis.y > 0.0);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let mut state = InputState::new();
        state.press(InputAction::MoveLeft);
        state.press(InputAction::MoveRight);

        assert!(!state.snapshot().is_movement_pressed());
    }

    #[test]
    fn test_snapshot_reports_jump_release() {
        let mut state = InputState::new();
        state.press(InputAction::Jump);
        state.press(InputAction::Run);
        state.clear_frame();
        state.release(InputAction::Jump);

        let snapshot = state.snapshot();
        assert!(snapshot.run_pressed);
        assert!(!snapshot.jump_pressed);
        assert!(snapshot.jump_released);

        state.clear_frame();
        assert!(!state.snapshot().jump_released);
    }
}
