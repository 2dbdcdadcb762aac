use super::feed::{FeedReceiver, RatingFeed, Subscription};
use super::traits::RatingStore;
use super::types::{
    Dish, DishOrder, NewDish, NewRating, Outcome, Rating, RatingCounts, RatingInserted,
};
use crate::error::StoreError;
use crate::observability::{NoopObserver, Observer, ObserverEvent, ObserverMetric};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Persistence plus realtime fan-out for ratings.
///
/// Every successful submission is published on the feed after it is stored,
/// so subscribers never see a rating the store cannot return.
#[derive(Clone)]
pub struct RatingPipeline {
    store: Arc<dyn RatingStore>,
    feed: RatingFeed,
    observer: Arc<dyn Observer>,
}

impl RatingPipeline {
    pub fn new(store: Arc<dyn RatingStore>, feed: RatingFeed) -> Self {
        Self {
            store,
            feed,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn store(&self) -> &Arc<dyn RatingStore> {
        &self.store
    }

    pub fn feed(&self) -> &RatingFeed {
        &self.feed
    }

    pub fn observer(&self) -> &Arc<dyn Observer> {
        &self.observer
    }

    pub async fn fetch_dishes(&self) -> Result<Vec<Dish>, StoreError> {
        self.store.fetch_dishes().await
    }

    pub async fn fetch_dishes_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Vec<Dish>, StoreError> {
        let dishes = self.store.fetch_dishes_by_order_number(order_number).await?;
        self.observer.record_event(&ObserverEvent::OrderLoaded {
            order_number: order_number.trim().to_string(),
            dishes: dishes.len(),
        });
        Ok(dishes)
    }

    pub async fn associate_dish_with_order(
        &self,
        dish_id: &str,
        order_number: &str,
    ) -> Result<DishOrder, StoreError> {
        self.store
            .associate_dish_with_order(dish_id, order_number)
            .await
    }

    pub async fn insert_dish(&self, dish: NewDish) -> Result<Dish, StoreError> {
        self.store.insert_dish(dish).await
    }

    /// Persist one rating and announce it on the feed. Never retried.
    pub async fn submit_rating(
        &self,
        dish_id: &str,
        outcome: Outcome,
        comment: Option<String>,
    ) -> Result<Rating, StoreError> {
        let input = NewRating {
            dish_id: dish_id.to_string(),
            outcome,
            comment,
        };

        let started = Instant::now();
        let submitted = self.store.submit_rating(input).await;
        self.observer
            .record_metric(&ObserverMetric::RequestLatency(started.elapsed()));

        match submitted {
            Ok(rating) => {
                self.observer.record_event(&ObserverEvent::RatingSubmitted {
                    dish_id: rating.dish_id.clone(),
                    outcome,
                });
                let reached = self.feed.publish(RatingInserted {
                    rating: rating.clone(),
                });
                tracing::debug!(rating_id = %rating.id, reached, "feed.published");
                Ok(rating)
            }
            Err(error) => {
                self.observer.record_event(&ObserverEvent::RatingFailed {
                    dish_id: dish_id.to_string(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    pub async fn get_ratings_count(&self, dish_id: &str) -> Result<RatingCounts, StoreError> {
        self.store.ratings_count(dish_id).await
    }

    pub async fn list_ratings(&self, dish_id: &str) -> Result<Vec<Rating>, StoreError> {
        self.store.list_ratings(dish_id).await
    }

    /// Run `on_insert` for every rating inserted from now on, system-wide.
    pub fn subscribe_to_ratings<F, Fut>(&self, on_insert: F) -> Subscription
    where
        F: Fn(RatingInserted) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.feed.subscribe(on_insert)
    }

    pub fn ratings_receiver(&self) -> FeedReceiver {
        self.feed.receiver()
    }
}
