//! Collaborators the host engine provides to the locomotion core

use glam::Vec3;

/// Answers whether the character is resting on a supporting surface
pub trait GroundContact {
    fn is_grounded(&self) -> bool;
}

/// Performs collision-aware translation of the character
pub trait MovementPrimitive {
    /// Translate by `displacement` (already scaled by `dt`)
    fn move_by(&mut self, displacement: Vec3, dt: f32);
}
