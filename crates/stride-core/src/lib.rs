//! Stride Core - Clock and scheduling primitives for the Stride locomotion core
//!
//! This crate provides the host-side collaborators the state machine consumes:
//! - Mathematical primitives (re-exported from glam)
//! - Scaled simulation time with a fixed-step accumulator
//! - A cancellable single-shot timer scheduler driven by simulation time

pub mod scheduler;
pub mod time;

pub use glam::{Quat, Vec2, Vec3};
pub use scheduler::{Scheduler, SchedulerError, SimScheduler, TimerHandle};
pub use time::{SimClock, TimeConfig, TimeConfigError};
