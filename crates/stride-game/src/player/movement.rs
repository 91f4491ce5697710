//! Movement configuration and constants

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Designer-facing movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second at full stick deflection
    pub walk_speed: f32,
    /// Run speed multiplier (applied to walk_speed)
    pub run_multiplier: f32,
    /// How fast the character turns toward its movement direction
    pub rotation_factor: f32,
    /// Terminal vertical velocity (negative, meters per second)
    pub max_falling_speed: f32,
    /// Apex height of the first jump stage in meters
    pub max_jump_height: f32,
    /// Total airtime of the first jump stage in seconds
    pub max_jump_time: f32,
    /// Jump reset timer fires after `stage airtime / jump_reset_divisor`
    pub jump_reset_divisor: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.0,
            run_multiplier: 3.0,
            rotation_factor: 15.0,
            max_falling_speed: -20.0,
            max_jump_height: 2.0,
            max_jump_time: 0.75,
            jump_reset_divisor: 2.0,
        }
    }
}

impl MovementConfig {
    /// Horizontal speed for the given gait
    pub fn max_speed(&self, running: bool) -> f32 {
        if running {
            self.walk_speed * self.run_multiplier
        } else {
            self.walk_speed
        }
    }

    /// Reject tuning the jump table and integrator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("run_multiplier", self.run_multiplier),
            ("rotation_factor", self.rotation_factor),
            ("max_jump_height", self.max_jump_height),
            ("max_jump_time", self.max_jump_time),
            ("jump_reset_divisor", self.jump_reset_divisor),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !self.max_falling_speed.is_finite() || self.max_falling_speed >= 0.0 {
            return Err(ConfigError::FallingSpeedNotNegative(self.max_falling_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_speed(false), 1.0);
        assert_eq!(config.max_speed(true), 3.0);
    }

    #[test]
    fn test_rejects_zero_jump_time() {
        let config = MovementConfig {
            max_jump_time: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "max_jump_time",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_upward_terminal_velocity() {
        let config = MovementConfig {
            max_falling_speed: 5.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FallingSpeedNotNegative(5.0))
        );
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: MovementConfig = toml::from_str("max_jump_height = 3.0").unwrap();
        assert_eq!(config.max_jump_height, 3.0);
        assert_eq!(config.run_multiplier, 3.0);
    }
}
