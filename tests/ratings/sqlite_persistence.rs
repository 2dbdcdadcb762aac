use dishswipe::config::Config;
use dishswipe::ratings::{Outcome, RatingStore, SqliteRatingStore, create_pipeline};
use tempfile::TempDir;
use tokio_test::assert_ok;

use crate::store_harness::{ORDER, seeded_order, temp_pipeline};

#[tokio::test]
async fn ratings_survive_reopening_the_database() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ratings.db");

    let dish_id = {
        let store = SqliteRatingStore::open(&path).await.unwrap();
        let dish = store
            .insert_dish(dishswipe::ratings::sample_dishes().remove(0))
            .await
            .unwrap();
        assert_ok!(
            store
                .submit_rating(dishswipe::ratings::NewRating::new(&dish.id, Outcome::Like))
                .await
        );
        dish.id
    };

    let reopened = SqliteRatingStore::open(&path).await.unwrap();
    let counts = reopened.ratings_count(&dish_id).await.unwrap();
    assert_eq!(counts.likes, 1);
    assert_eq!(counts.dislikes, 0);
}

#[tokio::test]
async fn order_lookup_returns_associated_dishes_newest_first() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let seeded = seeded_order(&pipeline).await;

    let dishes = pipeline.fetch_dishes_by_order_number(ORDER).await.unwrap();

    assert_eq!(dishes.len(), seeded.len());
    assert_eq!(dishes[0].id, seeded[seeded.len() - 1].id);
    assert!(dishes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn order_lookup_trims_the_order_number() {
    let (_tmp, pipeline) = temp_pipeline().await;
    seeded_order(&pipeline).await;

    let padded = pipeline
        .fetch_dishes_by_order_number(&format!("  {ORDER}\t"))
        .await
        .unwrap();

    assert_eq!(padded.len(), 2);
}

#[tokio::test]
async fn pipeline_from_config_uses_the_data_dir() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_or_init_in(tmp.path()).unwrap();

    let pipeline = create_pipeline(&config).await.unwrap();

    assert!(pipeline.store().health_check().await);
    assert!(config.database_path().exists());
}

#[tokio::test]
async fn memory_backend_keeps_nothing_on_disk() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::load_or_init_in(tmp.path()).unwrap();
    config.store.backend = "memory".into();

    let pipeline = create_pipeline(&config).await.unwrap();

    assert!(pipeline.fetch_dishes().await.unwrap().is_empty());
    assert!(!config.database_path().exists());
}
