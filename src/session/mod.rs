//! Diner screen flow: order entry, one card per dish, rating toasts and the
//! live count for the dish on screen.

pub mod notification;

pub use notification::{Notification, NotificationVariant};

use crate::config::GestureConfig;
use crate::gesture::{
    CardAnimator, CardButton, Classification, GestureSample, SwipeCard, SwipeDecision,
};
use crate::observability::ObserverEvent;
use crate::ratings::{CountCache, Dish, Rating, RatingCounts, RatingPipeline, Subscription};
use std::sync::Arc;

pub struct DinerSession {
    pipeline: RatingPipeline,
    gesture: GestureConfig,
    animator: Arc<dyn CardAnimator>,
    order_number: Option<String>,
    dishes: Vec<Dish>,
    index: usize,
    card: Option<SwipeCard>,
    counts: Arc<CountCache>,
    watch: Option<Subscription>,
    notifications: Vec<Notification>,
}

impl DinerSession {
    pub fn new(
        pipeline: RatingPipeline,
        gesture: GestureConfig,
        animator: Arc<dyn CardAnimator>,
    ) -> Self {
        Self {
            pipeline,
            gesture,
            animator,
            order_number: None,
            dishes: Vec::new(),
            index: 0,
            card: None,
            counts: Arc::new(CountCache::new()),
            watch: None,
            notifications: Vec::new(),
        }
    }

    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn current_dish(&self) -> Option<&Dish> {
        self.dishes.get(self.index)
    }

    pub fn card(&self) -> Option<&SwipeCard> {
        self.card.as_ref()
    }

    /// Look up the dishes of `order_number` and show the first one.
    ///
    /// Returns the number of dishes loaded. A blank order number or a failed
    /// lookup leaves a destructive notification and loads nothing.
    pub async fn submit_order(&mut self, order_number: &str) -> usize {
        let order_number = order_number.trim();
        if order_number.is_empty() {
            self.notify(Notification::missing_order_number());
            return 0;
        }

        self.reset();
        let dishes = match self
            .pipeline
            .fetch_dishes_by_order_number(order_number)
            .await
        {
            Ok(dishes) => dishes,
            Err(error) => {
                tracing::error!(order_number, %error, "order.fetch_failed");
                self.report_error(&error);
                self.notify(Notification::order_failed());
                Vec::new()
            }
        };

        self.order_number = Some(order_number.to_string());
        self.dishes = dishes;
        self.show_current().await;
        self.dishes.len()
    }

    /// Show every dish instead of one order's dishes.
    pub async fn browse_all(&mut self) -> usize {
        self.reset();
        self.dishes = match self.pipeline.fetch_dishes().await {
            Ok(dishes) => dishes,
            Err(error) => {
                tracing::error!(%error, "dishes.fetch_failed");
                self.report_error(&error);
                Vec::new()
            }
        };
        self.show_current().await;
        self.dishes.len()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if let Some(card) = self.card.as_mut() {
            card.set_comment(comment);
        }
    }

    pub fn drag_move(&mut self, offset: f64) {
        if let Some(card) = self.card.as_mut() {
            card.drag_move(offset);
        }
    }

    /// Release the current card. A decisive gesture is rated once its exit
    /// animation has finished, then the next dish is shown.
    pub async fn drag_end(&mut self, sample: GestureSample) -> Option<Classification> {
        let card = self.card.as_mut()?;
        card.drag_start();

        let mut decided = None;
        let classification = card
            .drag_end(sample, |decision| decided = Some(decision))
            .await?;

        if let Some(decision) = decided {
            self.apply_decision(decision).await;
        }
        Some(classification)
    }

    /// Recover the current card after its `drag_end` future was dropped
    /// mid-animation. Returns whether the card was stuck.
    pub fn cancel_gesture(&mut self) -> bool {
        self.card.as_mut().is_some_and(SwipeCard::cancel)
    }

    /// Press one of the card buttons. Returns whether a rating was attempted.
    pub async fn tap(&mut self, button: CardButton) -> bool {
        let Some(card) = self.card.as_mut() else {
            return false;
        };

        let mut decided = None;
        card.tap(button, |decision| decided = Some(decision));

        match decided {
            Some(decision) => {
                self.apply_decision(decision).await;
                true
            }
            None => false,
        }
    }

    /// Latest known counts for the dish on screen; zero when unknown.
    pub fn current_counts(&self) -> RatingCounts {
        self.current_dish()
            .and_then(|dish| self.counts.get(&dish.id))
            .unwrap_or_default()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Drop the order, its dishes and the live count subscription.
    /// In-flight submissions are not cancelled.
    pub fn reset(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.unsubscribe();
        }
        self.order_number = None;
        self.dishes.clear();
        self.index = 0;
        self.card = None;
        self.counts.clear();
    }

    async fn apply_decision(&mut self, decision: SwipeDecision) -> Option<Rating> {
        let outcome = decision.outcome();
        let submitted = self
            .pipeline
            .submit_rating(&decision.dish_id, outcome, decision.comment)
            .await;

        let rating = match submitted {
            Ok(rating) => {
                self.notify(Notification::rated(outcome));
                Some(rating)
            }
            Err(error) => {
                tracing::error!(dish_id = %decision.dish_id, %error, "rating.submit_failed");
                self.notify(Notification::rating_failed());
                None
            }
        };

        self.advance().await;
        rating
    }

    async fn advance(&mut self) {
        if self.dishes.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.dishes.len();
        self.show_current().await;
    }

    async fn show_current(&mut self) {
        let Some(dish_id) = self.current_dish().map(|dish| dish.id.clone()) else {
            self.card = None;
            return;
        };
        self.card = Some(SwipeCard::new(
            dish_id.clone(),
            self.gesture,
            Arc::clone(&self.animator),
        ));
        self.watch(dish_id).await;
    }

    /// Subscribes before the first fetch so an insert landing in between is
    /// still seen.
    async fn watch(&mut self, dish_id: String) {
        if let Some(previous) = self.watch.take() {
            previous.unsubscribe();
        }

        let store = Arc::clone(self.pipeline.store());
        let counts = Arc::clone(&self.counts);
        let watched = dish_id.clone();
        let subscription = self.pipeline.subscribe_to_ratings(move |event| {
            let store = Arc::clone(&store);
            let counts = Arc::clone(&counts);
            let dish_id = watched.clone();
            async move {
                if event.dish_id() != dish_id {
                    return;
                }
                if let Err(error) = counts.refresh(&*store, &dish_id).await {
                    tracing::error!(dish_id = %dish_id, %error, "counts.fetch_failed");
                }
            }
        });
        self.watch = Some(subscription);

        if let Err(error) = self
            .counts
            .refresh(&**self.pipeline.store(), &dish_id)
            .await
        {
            tracing::error!(dish_id = %dish_id, %error, "counts.fetch_failed");
            self.report_error(&error);
        }
    }

    fn report_error(&self, error: &crate::error::StoreError) {
        self.pipeline.observer().record_event(&ObserverEvent::Error {
            component: "session".into(),
            message: error.to_string(),
        });
    }

    fn notify(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, "session.notify");
        self.notifications.push(notification);
    }
}
