//! State identities and closed dispatch to each state's behavior

use std::fmt;

use stride_core::Scheduler;

use super::context::MotionContext;
use super::jump_timer::JumpTimerEvent;
use super::states::{gait, grounded, jumping};

/// Every locomotion state. Grounded and Jumping are the mutually exclusive roots;
/// Idle, Walk and Run only live under Grounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Grounded,
    Jumping,
    Idle,
    Walk,
    Run,
}

impl StateId {
    /// All states in factory slot order
    pub const ALL: [StateId; 5] = [
        StateId::Grounded,
        StateId::Jumping,
        StateId::Idle,
        StateId::Walk,
        StateId::Run,
    ];

    /// Slot in the state table
    pub(crate) fn index(self) -> usize {
        match self {
            StateId::Grounded => 0,
            StateId::Jumping => 1,
            StateId::Idle => 2,
            StateId::Walk => 3,
            StateId::Run => 4,
        }
    }

    /// Whether this is a top-level state
    pub fn is_root(self) -> bool {
        matches!(self, StateId::Grounded | StateId::Jumping)
    }

    /// Whether entering this state selects a sub-state
    pub fn has_sub_states(self) -> bool {
        matches!(self, StateId::Grounded)
    }

    pub fn name(self) -> &'static str {
        match self {
            StateId::Grounded => "grounded",
            StateId::Jumping => "jumping",
            StateId::Idle => "idle",
            StateId::Walk => "walk",
            StateId::Run => "run",
        }
    }

    pub(crate) fn enter<S: Scheduler<JumpTimerEvent>>(
        self,
        ctx: &mut MotionContext,
        scheduler: &mut S,
    ) {
        match self {
            StateId::Grounded => grounded::enter(ctx),
            StateId::Jumping => jumping::enter(ctx, scheduler),
            StateId::Idle | StateId::Walk | StateId::Run => gait::enter(self, ctx),
        }
    }

    pub(crate) fn exit<S: Scheduler<JumpTimerEvent>>(
        self,
        ctx: &mut MotionContext,
        scheduler: &mut S,
    ) {
        match self {
            StateId::Jumping => jumping::exit(ctx, scheduler),
            StateId::Grounded | StateId::Idle | StateId::Walk | StateId::Run => {}
        }
    }

    /// Evaluate this state's guards and return the state it should switch to
    pub(crate) fn check_switch_states(self, ctx: &MotionContext) -> Option<StateId> {
        match self {
            StateId::Grounded => grounded::check_switch_states(ctx),
            StateId::Jumping => jumping::check_switch_states(ctx),
            StateId::Idle | StateId::Walk | StateId::Run => gait::check_switch_states(self, ctx),
        }
    }

    /// Sub-state to activate on entry, for super-states that own sub-states
    pub(crate) fn initial_sub_state(self, ctx: &MotionContext) -> Option<StateId> {
        match self {
            StateId::Grounded => Some(grounded::initial_sub_state(ctx)),
            StateId::Jumping | StateId::Idle | StateId::Walk | StateId::Run => None,
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
