//! In-memory body for driving the machine without a physics world

use glam::Vec3;

use super::host::{GroundContact, MovementPrimitive};

/// Body whose ground contact is set by the test and which records every move
#[derive(Debug, Default)]
pub(crate) struct ScriptedBody {
    pub grounded: bool,
    pub position: Vec3,
    pub moves: Vec<Vec3>,
}

impl ScriptedBody {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Self::default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

impl GroundContact for ScriptedBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

impl MovementPrimitive for ScriptedBody {
    fn move_by(&mut self, displacement: Vec3, _dt: f32) {
        self.position += displacement;
        self.moves.push(displacement);
    }
}
