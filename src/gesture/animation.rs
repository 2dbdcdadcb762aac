use super::classifier::{Classification, SwipeDirection};
use crate::config::GestureConfig;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

/// Visual state of the card surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSurface {
    pub x: f64,
    pub opacity: f64,
}

impl CardSurface {
    pub const REST: Self = Self { x: 0.0, opacity: 1.0 };
}

impl Default for CardSurface {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationDirective {
    /// Throw the card off-screen while fading it out.
    Exit {
        x: f64,
        opacity: f64,
        duration: Duration,
    },
    /// Spring back to the rest position.
    Return { stiffness: f64, damping: f64 },
}

impl AnimationDirective {
    pub fn exit(direction: SwipeDirection, config: &GestureConfig) -> Self {
        Self::Exit {
            x: direction.sign() * config.exit_distance,
            opacity: 0.0,
            duration: Duration::from_millis(config.exit_duration_ms),
        }
    }

    pub fn spring_return(config: &GestureConfig) -> Self {
        Self::Return {
            stiffness: config.spring_stiffness,
            damping: config.spring_damping,
        }
    }

    pub fn for_classification(classification: Classification, config: &GestureConfig) -> Self {
        match classification {
            Classification::Decisive { direction } => Self::exit(direction, config),
            Classification::Indecisive => Self::spring_return(config),
        }
    }

    /// Where the surface ends up once the animation completes.
    pub fn target(&self) -> CardSurface {
        match *self {
            Self::Exit { x, opacity, .. } => CardSurface { x, opacity },
            Self::Return { .. } => CardSurface::REST,
        }
    }

    pub fn duration(&self) -> Duration {
        match *self {
            Self::Exit { duration, .. } => duration,
            Self::Return { stiffness, damping } => spring_settle_time(stiffness, damping),
        }
    }
}

/// Approximate 2% settling time of a unit-mass spring.
pub fn spring_settle_time(stiffness: f64, damping: f64) -> Duration {
    let omega = stiffness.sqrt();
    let zeta = damping / (2.0 * omega);
    let decay = if zeta < 1.0 {
        zeta * omega
    } else {
        omega * (zeta - (zeta * zeta - 1.0).sqrt())
    };
    if decay.is_finite() && decay > 0.0 {
        Duration::from_secs_f64(4.0 / decay)
    } else {
        Duration::ZERO
    }
}

/// Drives the card surface. `animate` resolves once the animation has
/// finished playing.
pub trait CardAnimator: Send + Sync {
    /// Follow the pointer while the card is being dragged.
    fn track(&self, _offset: f64) {}

    /// Put a freshly shown card back at rest without animating.
    fn reset(&self) {}

    fn animate(
        &self,
        directive: AnimationDirective,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Animator backed by the tokio timer: waits out the directive's duration,
/// then lands the surface on its target.
#[derive(Debug, Default)]
pub struct TimedAnimator {
    surface: Mutex<CardSurface>,
}

impl TimedAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> CardSurface {
        *self
            .surface
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn set_surface(&self, surface: CardSurface) {
        *self
            .surface
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = surface;
    }
}

impl CardAnimator for TimedAnimator {
    fn track(&self, offset: f64) {
        self.set_surface(CardSurface {
            x: offset,
            opacity: 1.0,
        });
    }

    fn reset(&self) {
        self.set_surface(CardSurface::REST);
    }

    fn animate(
        &self,
        directive: AnimationDirective,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            tokio::time::sleep(directive.duration()).await;
            self.set_surface(directive.target());
        })
    }
}

/// Animator with no visual surface; every animation completes immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantAnimator;

impl CardAnimator for InstantAnimator {
    fn animate(
        &self,
        _directive: AnimationDirective,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(std::future::ready(()))
    }
}
