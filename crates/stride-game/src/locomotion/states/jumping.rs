//! Jumping root state: launches a stage and arms its reset timer

use stride_core::Scheduler;

use crate::locomotion::context::MotionContext;
use crate::locomotion::jump_timer::{self, JumpTimerEvent};
use crate::locomotion::state::StateId;

pub(crate) fn enter<S: Scheduler<JumpTimerEvent>>(ctx: &mut MotionContext, scheduler: &mut S) {
    let stage = ctx.enter_jump_stage();
    let launch = ctx.jump_table().initial_velocity(stage);
    ctx.set_vertical_velocity(launch, launch);

    ctx.signals.is_jumping = true;
    ctx.require_new_jump_press = true;
    ctx.stage_advance_ready = false;

    jump_timer::arm(ctx, scheduler, stage);
}

pub(crate) fn exit<S: Scheduler<JumpTimerEvent>>(ctx: &mut MotionContext, scheduler: &mut S) {
    jump_timer::cancel(ctx, scheduler);
    ctx.signals.is_jumping = false;
}

/// Landing takes priority over chaining into the next stage
pub(crate) fn check_switch_states(ctx: &MotionContext) -> Option<StateId> {
    if ctx.applied_movement().y <= 0.0 && ctx.is_grounded {
        Some(StateId::Grounded)
    } else if ctx.stage_advance_ready && ctx.is_jump_pressed {
        Some(StateId::Jumping)
    } else {
        None
    }
}
