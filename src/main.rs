//! Stride - headless locomotion harness
//!
//! Runs a scripted input sequence (idle, walk, run, a held triple jump, a
//! landing) against a rapier ground plane and logs every state change.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec3;
use stride_core::SimClock;
use stride_game::{InputAction, InputState, PlayerController, StateId};
use stride_physics::PhysicsWorld;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::StrideSettings;

/// One scripted stretch of held input
struct Segment {
    label: &'static str,
    seconds: f32,
    held: &'static [InputAction],
}

const SCRIPT: &[Segment] = &[
    Segment { label: "idle", seconds: 0.5, held: &[] },
    Segment { label: "walk", seconds: 1.0, held: &[InputAction::MoveForward] },
    Segment { label: "run", seconds: 1.0, held: &[InputAction::MoveForward, InputAction::Run] },
    Segment { label: "triple jump", seconds: 2.0, held: &[InputAction::MoveRight, InputAction::Jump] },
    Segment { label: "land", seconds: 2.0, held: &[] },
];

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = StrideSettings::load(settings_path.as_deref());
    info!("Starting Stride harness...");

    let mut physics = PhysicsWorld::new();
    physics.create_ground(0.0);
    let mut player = PlayerController::with_config(settings.movement.clone())
        .context("Invalid movement settings")?;
    player.spawn(&mut physics, Vec3::new(0.0, settings.harness.spawn_height, 0.0));
    physics.refresh_queries();
    info!(colliders = physics.collider_count(), "world ready");

    let mut clock = SimClock::new(settings.time.clone()).context("Invalid time settings")?;
    let frame_delta = 1.0 / settings.harness.frame_rate.max(1.0);
    let camera_yaw = settings.harness.camera_yaw_degrees.to_radians();
    let fixed_dt = clock.fixed_timestep();

    let mut input = InputState::new();
    let mut last = (player.state(), player.machine.active_leaf(), player.machine.jump_count());

    for segment in SCRIPT {
        info!(segment = segment.label, seconds = segment.seconds, "segment started");
        for action in [
            InputAction::MoveForward,
            InputAction::MoveBackward,
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::Jump,
            InputAction::Run,
        ] {
            if segment.held.contains(&action) {
                input.press(action);
            } else {
                input.release(action);
            }
        }

        let frames = (segment.seconds / frame_delta).round() as u32;
        for _ in 0..frames {
            for _ in 0..clock.advance(frame_delta) {
                player.fixed_update(&mut physics, &input, camera_yaw, fixed_dt);
                physics.refresh_queries();
                input.clear_frame();

                let now = (player.state(), player.machine.active_leaf(), player.machine.jump_count());
                if now != last {
                    log_transition(&player, now, clock.elapsed());
                    last = now;
                }
            }
        }
    }

    let position = player.position();
    info!(
        "Finished at ({:.2}, {:.2}, {:.2}) in {} after {:.2}s over {} frames",
        position.x,
        position.y,
        position.z,
        player.state(),
        clock.elapsed(),
        clock.frame_count()
    );
    Ok(())
}

fn log_transition(player: &PlayerController, (root, leaf, jump_count): (StateId, StateId, u8), at: f64) {
    let signals = player.signals();
    let machine = &player.machine;
    let reset_in = machine
        .context()
        .jump_reset
        .and_then(|handle| machine.scheduler().remaining(handle));
    info!(
        at = format_args!("{at:.3}"),
        state = %root,
        leaf = %leaf,
        jump_count,
        reset_in = ?reset_in,
        "state changed"
    );
    debug!(
        walking = signals.is_walking,
        running = signals.is_running,
        jumping = signals.is_jumping,
        grounded = player.is_grounded(),
        height = player.position().y,
        facing = ?(player.rotation() * Vec3::Z),
        "presentation"
    );
}
