//! Simulation clock for the Stride core
//!
//! Host frames arrive with arbitrary deltas. The clock clamps and scales
//! each one, then reports how many fixed locomotion steps are now due.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Simulated seconds per real second
    pub time_scale: f32,
    /// Length of one locomotion step in simulated seconds
    pub fixed_timestep: f32,
    /// Longest real frame the clock accepts before clamping
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Invalid clock configuration
#[derive(Debug, Error, PartialEq)]
pub enum TimeConfigError {
    #[error("fixed_timestep must be positive, got {0}")]
    NonPositiveStep(f32),
    #[error("time_scale must not be negative, got {0}")]
    NegativeScale(f32),
}

/// Accumulates scaled frame time into fixed locomotion steps
#[derive(Debug, Clone)]
pub struct SimClock {
    config: TimeConfig,
    elapsed: f64,
    frames: u64,
    accumulator: f32,
}

impl SimClock {
    pub fn new(config: TimeConfig) -> Result<Self, TimeConfigError> {
        if !config.fixed_timestep.is_finite() || config.fixed_timestep <= 0.0 {
            return Err(TimeConfigError::NonPositiveStep(config.fixed_timestep));
        }
        if config.time_scale < 0.0 {
            return Err(TimeConfigError::NegativeScale(config.time_scale));
        }

        Ok(Self {
            config,
            elapsed: 0.0,
            frames: 0,
            accumulator: 0.0,
        })
    }

    /// Feed one host frame and return the number of fixed steps now due
    pub fn advance(&mut self, raw_delta: f32) -> u32 {
        let scaled = raw_delta.clamp(0.0, self.config.max_delta_time) * self.config.time_scale;
        self.frames += 1;
        self.elapsed += scaled as f64;
        self.accumulator += scaled;

        let step = self.config.fixed_timestep;
        let due = (self.accumulator / step).floor();
        self.accumulator = (self.accumulator - due * step).max(0.0);
        due as u32
    }

    /// Step length handed to every locomotion tick
    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Simulated seconds since the clock started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
