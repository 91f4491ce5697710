//! Idle, walk and run: leaf states under Grounded
//!
//! Leaves only switch between siblings; leaving the ground is decided by the
//! Grounded guard.

use crate::locomotion::context::MotionContext;
use crate::locomotion::state::StateId;

/// Gait for a pair of input flags. Run wins whenever the modifier is held.
pub fn select(movement_pressed: bool, run_pressed: bool) -> StateId {
    match (movement_pressed, run_pressed) {
        (false, false) => StateId::Idle,
        (true, false) => StateId::Walk,
        (_, true) => StateId::Run,
    }
}

/// Horizontal speed factor applied to the movement input
pub(crate) fn speed_factor(gait: StateId, ctx: &MotionContext) -> f32 {
    let config = ctx.config();
    match gait {
        StateId::Walk => config.max_speed(false),
        StateId::Run => config.max_speed(true),
        StateId::Idle | StateId::Grounded | StateId::Jumping => 0.0,
    }
}

pub(crate) fn enter(gait: StateId, ctx: &mut MotionContext) {
    let (walking, running) = match gait {
        StateId::Walk => (true, false),
        StateId::Run => (true, true),
        StateId::Idle | StateId::Grounded | StateId::Jumping => (false, false),
    };
    ctx.signals.is_walking = walking;
    ctx.signals.is_running = running;
}

pub(crate) fn check_switch_states(gait: StateId, ctx: &MotionContext) -> Option<StateId> {
    let moving = ctx.is_movement_pressed;
    let running = ctx.is_run_pressed;

    match gait {
        StateId::Idle if running => Some(StateId::Run),
        StateId::Idle if moving => Some(StateId::Walk),
        StateId::Walk if !moving && !running => Some(StateId::Idle),
        StateId::Walk if running => Some(StateId::Run),
        StateId::Run if !running && moving => Some(StateId::Walk),
        StateId::Run if !running => Some(StateId::Idle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MovementConfig;

    const FLAGS: [(bool, bool); 4] = [(false, false), (true, false), (true, true), (false, true)];
    const GAITS: [StateId; 3] = [StateId::Idle, StateId::Walk, StateId::Run];

    #[test]
    fn test_guards_agree_with_selection_from_every_leaf() {
        let mut ctx = MotionContext::new(MovementConfig::default()).unwrap();

        for (moving, running) in FLAGS {
            ctx.is_movement_pressed = moving;
            ctx.is_run_pressed = running;
            let expected = select(moving, running);

            for from in GAITS {
                let next = check_switch_states(from, &ctx).unwrap_or(from);
                assert_eq!(next, expected, "from {from} with moving={moving} running={running}");
            }
        }
    }

    #[test]
    fn test_all_six_sibling_edges_exist() {
        let mut ctx = MotionContext::new(MovementConfig::default()).unwrap();
        let mut edges = Vec::new();

        for (moving, running) in FLAGS {
            ctx.is_movement_pressed = moving;
            ctx.is_run_pressed = running;
            for from in GAITS {
                if let Some(to) = check_switch_states(from, &ctx) {
                    if !edges.contains(&(from, to)) {
                        edges.push((from, to));
                    }
                }
            }
        }

        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|(_, to)| !to.is_root()));
    }

    #[test]
    fn test_enter_sets_presentation_signals() {
        let mut ctx = MotionContext::new(MovementConfig::default()).unwrap();

        enter(StateId::Run, &mut ctx);
        assert!(ctx.signals.is_walking && ctx.signals.is_running);

        enter(StateId::Walk, &mut ctx);
        assert!(ctx.signals.is_walking && !ctx.signals.is_running);

        enter(StateId::Idle, &mut ctx);
        assert!(!ctx.signals.is_walking && !ctx.signals.is_running);
    }
}
