//! Delayed jump reset armed on every jump stage entry

use stride_core::Scheduler;
use tracing::{debug, warn};

use super::context::MotionContext;

/// Payload delivered when a stage's reset timer comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTimerEvent {
    /// Stage that armed the timer
    pub stage: u8,
}

/// Replace any pending reset with a fresh one for `stage`
pub(crate) fn arm<S: Scheduler<JumpTimerEvent>>(
    ctx: &mut MotionContext,
    scheduler: &mut S,
    stage: u8,
) {
    cancel(ctx, scheduler);

    let delay = ctx.jump_table().airtime(stage) / ctx.config().jump_reset_divisor;
    match scheduler.schedule_once(delay, JumpTimerEvent { stage }) {
        Ok(handle) => {
            debug!(stage, delay, timer = handle.id(), "jump reset armed");
            ctx.jump_reset = Some(handle);
        }
        Err(err) => warn!(stage, "jump reset not armed: {}", err),
    }
}

/// Cancel the pending reset, if any
pub(crate) fn cancel<S: Scheduler<JumpTimerEvent>>(ctx: &mut MotionContext, scheduler: &mut S) {
    if let Some(handle) = ctx.jump_reset.take() {
        if scheduler.cancel(handle) {
            debug!(timer = handle.id(), "jump reset cancelled");
        }
    }
}
