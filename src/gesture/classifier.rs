use crate::config::GestureConfig;
use crate::ratings::Outcome;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Telemetry captured when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Cumulative horizontal offset from the rest position (signed)
    pub offset: f64,
    /// Horizontal release velocity in units per second (signed)
    pub velocity: f64,
}

impl GestureSample {
    pub const fn new(offset: f64, velocity: f64) -> Self {
        Self { offset, velocity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub const fn outcome(self) -> Outcome {
        match self {
            Self::Left => Outcome::Dislike,
            Self::Right => Outcome::Like,
        }
    }

    /// +1 for right, -1 for left.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl From<Outcome> for SwipeDirection {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Like => Self::Right,
            Outcome::Dislike => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Decisive { direction: SwipeDirection },
    Indecisive,
}

impl Classification {
    pub const fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Decisive { direction } => Some(direction),
            Self::Indecisive => None,
        }
    }

    pub const fn is_decisive(self) -> bool {
        matches!(self, Self::Decisive { .. })
    }
}

/// Map a released drag to a rating decision.
///
/// Decisive when `|velocity| >= velocity_threshold` or
/// `|offset| > offset_threshold`. The direction follows the sign of the
/// offset only: a fast flick released exactly at offset 0 resolves left.
pub fn classify(sample: GestureSample, config: &GestureConfig) -> Classification {
    let decisive = sample.velocity.abs() >= config.velocity_threshold
        || sample.offset.abs() > config.offset_threshold;

    if !decisive {
        return Classification::Indecisive;
    }

    let direction = if sample.offset > 0.0 {
        SwipeDirection::Right
    } else {
        SwipeDirection::Left
    };
    Classification::Decisive { direction }
}
