use super::animation::{AnimationDirective, CardAnimator};
use super::classifier::{Classification, GestureSample, SwipeDirection, classify};
use crate::config::GestureConfig;
use crate::ratings::Outcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Idle,
    Dragging,
    /// An exit or return animation is playing; input is ignored.
    Animating,
    /// A decision has been reported; the card is done.
    Settled,
}

/// The three buttons under the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardButton {
    /// The "X" button
    Dismiss,
    Star,
    Heart,
}

impl CardButton {
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::Dismiss => SwipeDirection::Left,
            Self::Star | Self::Heart => SwipeDirection::Right,
        }
    }
}

/// What the card reports upward once the diner has decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeDecision {
    pub dish_id: String,
    pub direction: SwipeDirection,
    pub comment: Option<String>,
}

impl SwipeDecision {
    pub const fn outcome(&self) -> Outcome {
        self.direction.outcome()
    }
}

/// One dish card and its gesture state machine.
///
/// A card reports at most one decision over its lifetime. For a decisive
/// drag the decision callback runs only after the exit animation has
/// resolved; if the `drag_end` future is dropped before that, no decision is
/// reported and the card stays in [`CardPhase::Animating`] until
/// [`SwipeCard::cancel`] puts it back at rest.
pub struct SwipeCard {
    dish_id: String,
    comment: Option<String>,
    phase: CardPhase,
    config: GestureConfig,
    animator: Arc<dyn CardAnimator>,
}

impl SwipeCard {
    pub fn new(
        dish_id: impl Into<String>,
        config: GestureConfig,
        animator: Arc<dyn CardAnimator>,
    ) -> Self {
        animator.reset();
        Self {
            dish_id: dish_id.into(),
            comment: None,
            phase: CardPhase::Idle,
            config,
            animator,
        }
    }

    pub fn dish_id(&self) -> &str {
        &self.dish_id
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        let comment = comment.into();
        self.comment = (!comment.trim().is_empty()).then_some(comment);
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, CardPhase::Idle | CardPhase::Dragging)
    }

    pub fn drag_start(&mut self) {
        if self.phase == CardPhase::Idle {
            self.phase = CardPhase::Dragging;
        }
    }

    pub fn drag_move(&mut self, offset: f64) {
        if self.accepts_input() {
            self.phase = CardPhase::Dragging;
            self.animator.track(offset);
        }
    }

    /// Classify the released drag, play the matching animation and, for a
    /// decisive gesture, report the decision once the card is off-screen.
    ///
    /// Returns `None` when the card is not accepting input.
    pub async fn drag_end<F>(
        &mut self,
        sample: GestureSample,
        on_decision: F,
    ) -> Option<Classification>
    where
        F: FnOnce(SwipeDecision),
    {
        if !self.accepts_input() {
            return None;
        }

        let classification = classify(sample, &self.config);
        let directive = AnimationDirective::for_classification(classification, &self.config);

        self.phase = CardPhase::Animating;
        self.animator.animate(directive).await;

        match classification {
            Classification::Decisive { direction } => {
                self.phase = CardPhase::Settled;
                on_decision(self.decision(direction));
            }
            Classification::Indecisive => {
                self.phase = CardPhase::Idle;
            }
        }
        Some(classification)
    }

    /// Button press: reports the decision right away, without an exit animation.
    ///
    /// Returns whether a decision was reported.
    pub fn tap<F>(&mut self, button: CardButton, on_decision: F) -> bool
    where
        F: FnOnce(SwipeDecision),
    {
        if !self.accepts_input() {
            return false;
        }
        self.phase = CardPhase::Settled;
        on_decision(self.decision(button.direction()));
        true
    }

    /// Abandon an interrupted animation: the surface snaps back to rest and
    /// the card accepts input again. A settled card stays settled.
    ///
    /// Returns whether the card was recovered.
    pub fn cancel(&mut self) -> bool {
        if self.phase != CardPhase::Animating {
            return false;
        }
        self.animator.reset();
        self.phase = CardPhase::Idle;
        true
    }

    fn decision(&self, direction: SwipeDirection) -> SwipeDecision {
        SwipeDecision {
            dish_id: self.dish_id.clone(),
            direction,
            comment: self.comment.clone(),
        }
    }
}

impl std::fmt::Debug for SwipeCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeCard")
            .field("dish_id", &self.dish_id)
            .field("phase", &self.phase)
            .field("comment", &self.comment)
            .finish_non_exhaustive()
    }
}
