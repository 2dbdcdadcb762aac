//! Rating pipeline: persistence of dishes, orders and ratings, per-dish
//! aggregates, and the realtime feed of inserted ratings.

pub mod counts;
pub mod feed;
pub mod pipeline;
pub mod seed;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use counts::CountCache;
pub use feed::{RatingFeed, Subscription};
pub use pipeline::RatingPipeline;
pub use seed::{sample_dishes, seed_sample_dishes};
pub use sqlite::SqliteRatingStore;
pub use traits::{RatingStore, StoreFuture};
pub use types::{
    Dish, DishOrder, NewDish, NewRating, Order, Outcome, Rating, RatingCounts, RatingInserted,
};

use crate::config::{Config, StoreConfig};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Open the store selected by `config.backend`.
pub async fn create_store(config: &StoreConfig, data_dir: &Path) -> Result<Arc<dyn RatingStore>> {
    let store = match config.backend.as_str() {
        "memory" => SqliteRatingStore::in_memory().await?,
        _ => SqliteRatingStore::open(&config.resolve_path(data_dir)).await?,
    };
    Ok(Arc::new(store))
}

/// Store, feed and observer wired from one config.
pub async fn create_pipeline(config: &Config) -> Result<RatingPipeline> {
    let store = create_store(&config.store, &config.data_dir).await?;
    let feed = RatingFeed::new(config.realtime.channel_capacity);
    let observer = crate::observability::create_observer(&config.observability);
    Ok(RatingPipeline::new(store, feed).with_observer(observer))
}
