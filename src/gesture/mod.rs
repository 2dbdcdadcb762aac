//! Swipe gesture classification and the per-card state machine.

pub mod animation;
pub mod card;
pub mod classifier;

pub use animation::{
    AnimationDirective, CardAnimator, CardSurface, InstantAnimator, TimedAnimator,
    spring_settle_time,
};
pub use card::{CardButton, CardPhase, SwipeCard, SwipeDecision};
pub use classifier::{Classification, GestureSample, SwipeDirection, classify};
