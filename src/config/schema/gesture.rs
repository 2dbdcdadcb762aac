use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tuning for the swipe-card gesture classifier and its animations.
///
/// Only the two thresholds are load-bearing for the like/dislike decision;
/// the exit and spring parameters shape the animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Release speed (units/s) at or above which a gesture is decisive
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f64,
    /// Drag distance (units) strictly above which a gesture is decisive
    #[serde(default = "default_offset_threshold")]
    pub offset_threshold: f64,
    /// How far off-screen a decided card is thrown
    #[serde(default = "default_exit_distance")]
    pub exit_distance: f64,
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u64,
    #[serde(default = "default_spring_stiffness")]
    pub spring_stiffness: f64,
    #[serde(default = "default_spring_damping")]
    pub spring_damping: f64,
}

fn default_velocity_threshold() -> f64 {
    500.0
}

fn default_offset_threshold() -> f64 {
    100.0
}

fn default_exit_distance() -> f64 {
    1000.0
}

fn default_exit_duration_ms() -> u64 {
    300
}

fn default_spring_stiffness() -> f64 {
    300.0
}

fn default_spring_damping() -> f64 {
    20.0
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: default_velocity_threshold(),
            offset_threshold: default_offset_threshold(),
            exit_distance: default_exit_distance(),
            exit_duration_ms: default_exit_duration_ms(),
            spring_stiffness: default_spring_stiffness(),
            spring_damping: default_spring_damping(),
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gesture.velocity_threshold", self.velocity_threshold),
            ("gesture.offset_threshold", self.offset_threshold),
            ("gesture.exit_distance", self.exit_distance),
            ("gesture.spring_stiffness", self.spring_stiffness),
            ("gesture.spring_damping", self.spring_damping),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        if self.exit_duration_ms == 0 {
            return Err(ConfigError::Validation(
                "gesture.exit_duration_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
