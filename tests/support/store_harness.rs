#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use dishswipe::ratings::{
    Dish, RatingFeed, RatingPipeline, RatingStore, SqliteRatingStore, seed_sample_dishes,
};

pub const ORDER: &str = "ORDER123";

pub async fn temp_store() -> (TempDir, SqliteRatingStore) {
    let tmp = TempDir::new().expect("tempdir");
    let store = SqliteRatingStore::open(&tmp.path().join("dishswipe.db"))
        .await
        .expect("sqlite store");
    (tmp, store)
}

pub async fn temp_pipeline() -> (TempDir, RatingPipeline) {
    let (tmp, store) = temp_store().await;
    let pipeline = RatingPipeline::new(Arc::new(store), RatingFeed::new(64));
    (tmp, pipeline)
}

/// Seed the sample dishes and attach them all to [`ORDER`].
pub async fn seeded_order(pipeline: &RatingPipeline) -> Vec<Dish> {
    let store: &dyn RatingStore = &**pipeline.store();
    let dishes = seed_sample_dishes(store).await.expect("seed");
    for dish in &dishes {
        pipeline
            .associate_dish_with_order(&dish.id, ORDER)
            .await
            .expect("associate");
    }
    dishes
}
