/// Errors raised while validating movement tuning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("max_falling_speed must be negative, got {0}")]
    FallingSpeedNotNegative(f32),
}
