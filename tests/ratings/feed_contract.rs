use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dishswipe::ratings::Outcome;

use crate::store_harness::{seeded_order, temp_pipeline};

#[tokio::test]
async fn repeated_subscribe_unsubscribe_leaves_no_handlers() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let calls = Arc::clone(&calls);
        let subscription = pipeline.subscribe_to_ratings(move |_| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });
        subscription.unsubscribe();
    }
    assert_eq!(pipeline.feed().active_subscriptions(), 0);

    let live = {
        let calls = Arc::clone(&calls);
        pipeline.subscribe_to_ratings(move |_| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        })
    };
    pipeline
        .submit_rating(&dishes[0].id, Outcome::Like, None)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    live.unsubscribe();
    assert_eq!(pipeline.feed().active_subscriptions(), 0);
}

#[tokio::test]
async fn every_subscriber_sees_each_insert() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let mut first = pipeline.ratings_receiver();
    let mut second = pipeline.ratings_receiver();

    let rating = pipeline
        .submit_rating(&dishes[1].id, Outcome::Dislike, None)
        .await
        .unwrap();

    assert_eq!(first.recv().await.unwrap().rating, rating);
    assert_eq!(second.recv().await.unwrap().rating, rating);
}

#[tokio::test]
async fn rejected_rating_is_never_announced() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let mut feed = pipeline.ratings_receiver();

    let result = pipeline
        .submit_rating("no-such-dish", Outcome::Like, None)
        .await;

    assert!(result.is_err());
    let pending = tokio::time::timeout(Duration::from_millis(50), feed.recv()).await;
    assert!(pending.is_err());
}
