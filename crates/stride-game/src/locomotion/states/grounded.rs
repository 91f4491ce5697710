//! Grounded root state: owns the idle/walk/run sub-states

use crate::locomotion::context::MotionContext;
use crate::locomotion::state::StateId;

use super::gait;

/// Landing removes falling momentum and ends any jump chain
pub(crate) fn enter(ctx: &mut MotionContext) {
    let resting = ctx.base_gravity();
    ctx.set_vertical_velocity(resting, resting);
    ctx.reset_jump_stage();
    ctx.stage_advance_ready = false;
}

pub(crate) fn check_switch_states(ctx: &MotionContext) -> Option<StateId> {
    (ctx.is_jump_pressed && !ctx.require_new_jump_press).then_some(StateId::Jumping)
}

pub(crate) fn initial_sub_state(ctx: &MotionContext) -> StateId {
    gait::select(ctx.is_movement_pressed, ctx.is_run_pressed)
}
