//! The hierarchical state machine: switching, sub-state wiring and tree updates

use glam::{Quat, Vec3};
use stride_core::{Scheduler, SimScheduler};
use tracing::debug;

use crate::error::ConfigError;
use crate::player::MovementConfig;

use super::context::{AnimationSignals, MotionContext};
use super::factory::StateFactory;
use super::jump_table::MAX_JUMP_STAGE;
use super::jump_timer::JumpTimerEvent;
use super::state::StateId;

/// Player locomotion state machine.
///
/// Exactly one root state is active at a time. While Grounded is active it
/// always has exactly one of Idle, Walk or Run as its sub-state.
pub struct PlayerStateMachine<S = SimScheduler<JumpTimerEvent>> {
    pub(super) ctx: MotionContext,
    pub(super) states: StateFactory,
    pub(super) current: StateId,
    pub(super) scheduler: S,
    /// Facing of the character, turned toward the movement direction
    pub(super) rotation: Quat,
}

impl PlayerStateMachine {
    /// Create a machine driven by its own simulation-time scheduler
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        Self::with_scheduler(config, SimScheduler::new())
    }
}

impl<S: Scheduler<JumpTimerEvent>> PlayerStateMachine<S> {
    /// Create a machine that arms jump resets on a host-provided scheduler
    pub fn with_scheduler(config: MovementConfig, scheduler: S) -> Result<Self, ConfigError> {
        let ctx = MotionContext::new(config)?;
        let states = StateFactory::new();
        let current = states.grounded();

        let mut machine = Self {
            ctx,
            states,
            current,
            scheduler,
            rotation: Quat::IDENTITY,
        };
        current.enter(&mut machine.ctx, &mut machine.scheduler);
        machine.initialize_sub_state(current);
        Ok(machine)
    }

    /// Active root state
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Active sub-state of the root, if it has one
    pub fn active_sub_state(&self) -> Option<StateId> {
        self.states.node(self.current).sub_state
    }

    /// Deepest active state
    pub fn active_leaf(&self) -> StateId {
        self.active_sub_state().unwrap_or(self.current)
    }

    pub fn states(&self) -> &StateFactory {
        &self.states
    }

    pub fn context(&self) -> &MotionContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Signals for animation binding
    pub fn signals(&self) -> AnimationSignals {
        self.ctx.signals
    }

    pub fn jump_count(&self) -> u8 {
        self.ctx.jump_count()
    }

    /// Velocity the integrator hands to the movement primitive
    pub fn applied_movement(&self) -> Vec3 {
        self.ctx.applied_movement()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Run one update of the state tree from the root down
    pub(super) fn update(&mut self) {
        self.update_states(self.current);
    }

    /// Update the active sub-state's full cycle, then this state's own guards
    fn update_states(&mut self, state: StateId) {
        if let Some(sub) = self.states.node(state).sub_state {
            self.update_states(sub);
        }
        if let Some(next) = state.check_switch_states(&self.ctx) {
            self.switch_state(state, next);
        }
    }

    /// Replace `from` with `to` in whichever slot `from` occupies
    pub(super) fn switch_state(&mut self, from: StateId, to: StateId) {
        from.exit(&mut self.ctx, &mut self.scheduler);
        if let Some(sub) = self.states.node_mut(from).sub_state.take() {
            sub.exit(&mut self.ctx, &mut self.scheduler);
            self.states.node_mut(sub).parent = None;
        }

        let parent = self.states.node_mut(from).parent.take();
        if self.states.node(from).is_root {
            debug!(from = %from, to = %to, jump_count = self.ctx.jump_count(), "root state switched");
            self.current = to;
            to.enter(&mut self.ctx, &mut self.scheduler);
        } else if let Some(parent) = parent {
            debug!(from = %from, to = %to, parent = %parent, "sub-state switched");
            self.set_sub_state(parent, to);
        }

        self.initialize_sub_state(to);
    }

    /// Select and enter the sub-state a super-state starts in
    fn initialize_sub_state(&mut self, state: StateId) {
        if let Some(sub) = state.initial_sub_state(&self.ctx) {
            self.set_sub_state(state, sub);
        }
    }

    fn set_sub_state(&mut self, parent: StateId, sub: StateId) {
        self.states.node_mut(parent).sub_state = Some(sub);
        self.states.node_mut(sub).parent = Some(parent);
        sub.enter(&mut self.ctx, &mut self.scheduler);
    }

    /// Apply a due jump reset. Exiting Jumping cancels the timer, so this only
    /// ever runs while Jumping is active. A held jump button stays locked until
    /// it is released.
    pub(super) fn handle_timer_event(&mut self, event: JumpTimerEvent) {
        debug_assert_eq!(self.current, StateId::Jumping, "jump reset fired outside Jumping");
        debug!(stage = event.stage, jump_count = self.ctx.jump_count(), "jump reset fired");

        self.ctx.jump_reset = None;
        // Only a button still held from the expired stage is locked out
        self.ctx.require_new_jump_press = self.ctx.is_jump_pressed;

        if self.ctx.jump_count() >= MAX_JUMP_STAGE {
            self.ctx.reset_jump_stage();
            self.switch_state(self.current, StateId::Grounded);
        } else {
            self.ctx.stage_advance_ready = true;
        }
    }
}
