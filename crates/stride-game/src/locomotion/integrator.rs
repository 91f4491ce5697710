//! Per-tick simulation step: gravity, gait speed, facing and movement

use glam::{Quat, Vec3};
use stride_core::Scheduler;

use crate::input::InputSnapshot;

use super::host::{GroundContact, MovementPrimitive};
use super::jump_timer::JumpTimerEvent;
use super::machine::PlayerStateMachine;
use super::state::StateId;
use super::states::gait;

impl<S: Scheduler<JumpTimerEvent>> PlayerStateMachine<S> {
    /// Advance the simulation by `dt` scaled seconds.
    ///
    /// Order: read input, deliver due jump resets, integrate vertical velocity,
    /// update the state tree, then derive horizontal velocity and facing and
    /// hand the camera-relative displacement to `body`. Returns that displacement.
    pub fn tick<B>(&mut self, input: &InputSnapshot, camera_yaw: f32, dt: f32, body: &mut B) -> Vec3
    where
        B: MovementPrimitive + GroundContact,
    {
        let dt = dt.max(0.0);

        self.ctx.apply_input(input);
        self.ctx.is_grounded = body.is_grounded();

        for event in self.scheduler.advance(dt) {
            self.handle_timer_event(event);
        }

        self.advance_vertical_velocity(dt);
        self.update();
        self.apply_horizontal_velocity();
        self.handle_rotation(camera_yaw, dt);

        let displacement = Quat::from_rotation_y(camera_yaw) * (self.ctx.applied_movement() * dt);
        body.move_by(displacement, dt);
        displacement
    }

    /// Velocity Verlet while airborne; grounded holds the resting pull
    fn advance_vertical_velocity(&mut self, dt: f32) {
        if self.current == StateId::Jumping {
            let previous = self.ctx.current_movement.y;
            let next = previous + self.ctx.gravity() * dt;
            self.ctx.set_vertical_velocity(next, (previous + next) * 0.5);
        } else {
            let resting = self.ctx.base_gravity();
            self.ctx.set_vertical_velocity(resting, resting);
        }
    }

    fn apply_horizontal_velocity(&mut self) {
        let current_gait = self
            .active_sub_state()
            .unwrap_or_else(|| gait::select(self.ctx.is_movement_pressed, self.ctx.is_run_pressed));
        let velocity = self.ctx.movement_input * gait::speed_factor(current_gait, &self.ctx);
        self.ctx.set_horizontal_velocity(velocity.x, velocity.y);
    }

    /// Turn toward the movement direction, relative to the camera yaw
    fn handle_rotation(&mut self, camera_yaw: f32, dt: f32) {
        if !self.ctx.is_movement_pressed {
            return;
        }

        let input = self.ctx.movement_input;
        let target = Quat::from_rotation_y(input.x.atan2(input.y) + camera_yaw);
        let t = (self.ctx.config().rotation_factor * dt).clamp(0.0, 1.0);
        self.rotation = self.rotation.slerp(target, t);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::locomotion::jump_table::MAX_JUMP_STAGE;
    use crate::locomotion::test_support::ScriptedBody;
    use crate::player::MovementConfig;

    const DT: f32 = 1.0 / 60.0;

    fn machine() -> PlayerStateMachine {
        PlayerStateMachine::new(MovementConfig::default()).unwrap()
    }

    fn assert_single_active_chain(machine: &PlayerStateMachine) {
        match machine.current_state() {
            StateId::Grounded => assert!(matches!(
                machine.active_sub_state(),
                Some(StateId::Idle | StateId::Walk | StateId::Run)
            )),
            StateId::Jumping => assert!(machine.active_sub_state().is_none()),
            other => panic!("{other} cannot be a root state"),
        }
    }

    #[test]
    fn test_idle_input_stays_idle() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();

        for _ in 0..3 {
            machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
            assert_eq!(machine.active_leaf(), StateId::Idle);
            assert_eq!(machine.jump_count(), 0);
            assert_single_active_chain(&machine);
        }
    }

    #[test]
    fn test_movement_switches_to_walk_same_tick() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);

        machine.tick(&InputSnapshot::moving(Vec2::Y), 0.0, DT, &mut body);

        assert_eq!(machine.current_state(), StateId::Grounded);
        assert_eq!(machine.active_leaf(), StateId::Walk);
        assert!(machine.signals().is_walking);
        assert!((machine.applied_movement().z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_leaf_table_is_independent_of_starting_leaf() {
        let flags = [(false, false), (true, false), (true, true), (false, true)];
        let expected = [StateId::Idle, StateId::Walk, StateId::Run, StateId::Run];

        for start in flags {
            for (target, want) in flags.iter().zip(expected) {
                let mut machine = machine();
                let mut body = ScriptedBody::grounded();
                let snapshot = |(moving, running): (bool, bool)| {
                    let movement = if moving { Vec2::X } else { Vec2::ZERO };
                    InputSnapshot::moving(movement).with_run(running)
                };

                machine.tick(&snapshot(start), 0.0, DT, &mut body);
                machine.tick(&snapshot(*target), 0.0, DT, &mut body);

                assert_eq!(machine.active_leaf(), want, "from {start:?} to {target:?}");
                assert_single_active_chain(&machine);
            }
        }
    }

    #[test]
    fn test_held_jump_does_not_retrigger() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        let jump = InputSnapshot::idle().with_jump(true);

        machine.tick(&jump, 0.0, DT, &mut body);

        assert_eq!(machine.current_state(), StateId::Jumping);
        assert_eq!(machine.jump_count(), 1);
        let launch = machine.context().jump_table().initial_velocity(1);
        assert_eq!(machine.context().current_movement.y, launch);
        assert!(machine.context().require_new_jump_press);

        machine.tick(&jump, 0.0, DT, &mut body);
        assert_eq!(machine.current_state(), StateId::Jumping);
        assert_eq!(machine.jump_count(), 1);
        assert_eq!(machine.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_landing_returns_to_grounded() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        machine.tick(&InputSnapshot::idle().with_jump(true), 0.0, DT, &mut body);
        body.grounded = false;

        let release = InputSnapshot::idle().with_jump_released();
        machine.tick(&release, 0.0, DT, &mut body);
        while machine.applied_movement().y > 0.0 {
            machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
            assert_eq!(machine.current_state(), StateId::Jumping);
        }

        body.grounded = true;
        machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);

        assert_eq!(machine.current_state(), StateId::Grounded);
        assert_eq!(machine.active_leaf(), StateId::Idle);
        assert_eq!(machine.jump_count(), 0);
        assert_eq!(machine.scheduler().pending_count(), 0);
        assert!(!machine.signals().is_jumping);
    }

    #[test]
    fn test_held_jump_chains_three_stages_then_forces_grounded() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        let jump = InputSnapshot::idle().with_jump(true);

        machine.tick(&jump, 0.0, DT, &mut body);
        body.grounded = false;

        let mut counts = vec![machine.jump_count()];
        for _ in 0..600 {
            machine.tick(&jump, 0.0, DT, &mut body);
            assert_single_active_chain(&machine);
            if counts.last() != Some(&machine.jump_count()) {
                counts.push(machine.jump_count());
            }
            if machine.current_state() == StateId::Grounded {
                break;
            }
        }

        assert_eq!(counts, vec![1, 2, MAX_JUMP_STAGE, 0]);
        assert_eq!(machine.current_state(), StateId::Grounded);
        assert!(!body.grounded);

        // Still held: the lock set by the final reset keeps us on the ground
        machine.tick(&jump, 0.0, DT, &mut body);
        assert_eq!(machine.current_state(), StateId::Grounded);

        // Release and press again to jump anew
        machine.tick(&InputSnapshot::idle().with_jump_released(), 0.0, DT, &mut body);
        machine.tick(&jump, 0.0, DT, &mut body);
        assert_eq!(machine.current_state(), StateId::Jumping);
        assert_eq!(machine.jump_count(), 1);
    }

    #[test]
    fn test_tapped_jump_can_jump_again_after_landing() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        machine.tick(&InputSnapshot::idle().with_jump(true), 0.0, DT, &mut body);
        body.grounded = false;

        machine.tick(&InputSnapshot::idle().with_jump_released(), 0.0, DT, &mut body);
        for _ in 0..30 {
            machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
        }
        // The stage reset fired while the button was up
        assert_eq!(machine.scheduler().pending_count(), 0);
        assert!(machine.context().stage_advance_ready);
        assert!(!machine.context().require_new_jump_press);

        body.grounded = true;
        machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
        assert_eq!(machine.current_state(), StateId::Grounded);

        machine.tick(&InputSnapshot::idle().with_jump(true), 0.0, DT, &mut body);
        assert_eq!(machine.current_state(), StateId::Jumping);
        assert_eq!(machine.jump_count(), 1);
    }

    #[test]
    fn test_stage_timing_follows_simulation_time_not_tick_count() {
        let airtime_to_reset = |dt: f32| {
            let mut machine = machine();
            let mut body = ScriptedBody::airborne();
            let jump = InputSnapshot::idle().with_jump(true);
            let mut elapsed = 0.0;
            machine.tick(&jump, 0.0, dt, &mut body);
            while machine.jump_count() == 1 {
                machine.tick(&jump, 0.0, dt, &mut body);
                elapsed += dt;
            }
            elapsed
        };

        let coarse = airtime_to_reset(1.0 / 30.0);
        let fine = airtime_to_reset(1.0 / 240.0);
        assert!((coarse - 0.375).abs() <= 1.0 / 30.0 + 1e-4);
        assert!((fine - 0.375).abs() <= 1.0 / 240.0 + 1e-4);
    }

    #[test]
    fn test_falling_speed_is_clamped() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        machine.tick(&InputSnapshot::idle().with_jump(true), 0.0, DT, &mut body);
        body.grounded = false;

        let release = InputSnapshot::idle().with_jump_released();
        machine.tick(&release, 0.0, DT, &mut body);
        for _ in 0..120 {
            machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
            let max_fall = machine.context().config().max_falling_speed;
            assert!(machine.applied_movement().y >= max_fall);
        }
    }

    #[test]
    fn test_run_speed_and_camera_relative_displacement() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        let run = InputSnapshot::moving(Vec2::Y).with_run(true);

        let displacement = machine.tick(&run, std::f32::consts::FRAC_PI_2, DT, &mut body);

        assert_eq!(machine.active_leaf(), StateId::Run);
        assert!((machine.applied_movement().z - 3.0).abs() < 1e-6);
        // Forward input with the camera yawed a quarter turn moves along +X
        assert!((displacement.x - 3.0 * DT).abs() < 1e-5);
        assert!(displacement.z.abs() < 1e-5);
        assert_eq!(body.moves.len(), 1);
    }

    #[test]
    fn test_rotation_turns_toward_movement() {
        let mut machine = machine();
        let mut body = ScriptedBody::grounded();
        let right = InputSnapshot::moving(Vec2::X);

        for _ in 0..120 {
            machine.tick(&right, 0.0, DT, &mut body);
        }

        let facing = machine.rotation() * Vec3::Z;
        assert!((facing - Vec3::X).length() < 1e-3);

        let before = machine.rotation();
        machine.tick(&InputSnapshot::idle(), 0.0, DT, &mut body);
        assert_eq!(machine.rotation(), before);
    }
}
