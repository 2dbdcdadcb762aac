use super::types::{Dish, DishOrder, NewDish, NewRating, Rating, RatingCounts};
use crate::error::StoreError;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every [`RatingStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Persistence boundary for dishes, orders and ratings.
///
/// Implementations are plain query/insert layers: they hold no per-diner
/// state and never retry.
pub trait RatingStore: Send + Sync {
    fn name(&self) -> &str;

    fn health_check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;

    fn insert_dish(&self, dish: NewDish) -> StoreFuture<'_, Dish>;

    /// All dishes, newest first.
    fn fetch_dishes(&self) -> StoreFuture<'_, Vec<Dish>>;

    /// Dishes associated with `order_number`, newest first. An unseen order
    /// number is recorded and yields no dishes.
    fn fetch_dishes_by_order_number<'a>(
        &'a self,
        order_number: &'a str,
    ) -> StoreFuture<'a, Vec<Dish>>;

    /// Create the order row if absent, then associate the dish with it.
    fn associate_dish_with_order<'a>(
        &'a self,
        dish_id: &'a str,
        order_number: &'a str,
    ) -> StoreFuture<'a, DishOrder>;

    /// Persist exactly one rating. Fails with [`StoreError::UnknownDish`] when
    /// the dish does not exist at submission time.
    fn submit_rating(&self, rating: NewRating) -> StoreFuture<'_, Rating>;

    fn list_ratings<'a>(&'a self, dish_id: &'a str) -> StoreFuture<'a, Vec<Rating>>;

    fn ratings_count<'a>(&'a self, dish_id: &'a str) -> StoreFuture<'a, RatingCounts> {
        Box::pin(async move {
            let ratings = self.list_ratings(dish_id).await?;
            Ok(RatingCounts::from_ratings(&ratings))
        })
    }
}
