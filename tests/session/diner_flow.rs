use std::sync::Arc;
use std::time::Duration;

use dishswipe::config::GestureConfig;
use dishswipe::gesture::{
    CardButton, CardPhase, CardSurface, Classification, GestureSample, SwipeDirection,
    TimedAnimator,
};
use dishswipe::ratings::{Outcome, RatingCounts};
use dishswipe::session::DinerSession;

use crate::store_harness::{ORDER, seeded_order, temp_pipeline};

fn quick_gestures() -> GestureConfig {
    GestureConfig {
        exit_duration_ms: 5,
        spring_stiffness: 40_000.0,
        spring_damping: 400.0,
        ..GestureConfig::default()
    }
}

#[tokio::test]
async fn diner_rates_every_dish_and_wraps_around() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let animator = Arc::new(TimedAnimator::new());
    let mut session =
        DinerSession::new(pipeline.clone(), quick_gestures(), animator.clone());

    assert_eq!(session.submit_order(&format!(" {ORDER} ")).await, dishes.len());
    let first = session.current_dish().unwrap().id.clone();

    session.drag_move(150.0);
    let swiped = session.drag_end(GestureSample::new(150.0, 0.0)).await;
    assert_eq!(
        swiped,
        Some(Classification::Decisive {
            direction: SwipeDirection::Right
        })
    );

    // The next card is fresh and back at rest.
    assert_eq!(animator.surface(), CardSurface::REST);
    assert_eq!(session.card().unwrap().phase(), CardPhase::Idle);

    session.set_comment("not for me");
    let flicked = session.drag_end(GestureSample::new(0.0, 600.0)).await;
    assert_eq!(flicked.and_then(Classification::direction), Some(SwipeDirection::Left));

    assert_eq!(session.current_dish().unwrap().id, first);

    let first_ratings = pipeline.list_ratings(&first).await.unwrap();
    assert_eq!(first_ratings.len(), 1);
    assert_eq!(first_ratings[0].outcome, Outcome::Like);

    let second = dishes.iter().find(|d| d.id != first).unwrap();
    let second_ratings = pipeline.list_ratings(&second.id).await.unwrap();
    assert_eq!(second_ratings[0].outcome, Outcome::Dislike);
    assert_eq!(second_ratings[0].comment.as_deref(), Some("not for me"));

    let titles: Vec<_> = session
        .drain_notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Loved it! 😋", "Maybe next time 👋"]);
}

#[tokio::test]
async fn indecisive_drag_springs_back_without_rating() {
    let (_tmp, pipeline) = temp_pipeline().await;
    seeded_order(&pipeline).await;
    let animator = Arc::new(TimedAnimator::new());
    let mut session =
        DinerSession::new(pipeline.clone(), quick_gestures(), animator.clone());
    session.submit_order(ORDER).await;
    let current = session.current_dish().unwrap().id.clone();

    session.drag_move(50.0);
    let result = session.drag_end(GestureSample::new(50.0, 100.0)).await;

    assert_eq!(result, Some(Classification::Indecisive));
    assert_eq!(animator.surface(), CardSurface::REST);
    assert_eq!(session.current_dish().unwrap().id, current);
    assert!(pipeline.list_ratings(&current).await.unwrap().is_empty());
}

#[tokio::test]
async fn live_counts_track_ratings_from_other_diners() {
    let (_tmp, pipeline) = temp_pipeline().await;
    seeded_order(&pipeline).await;
    let mut session = DinerSession::new(
        pipeline.clone(),
        quick_gestures(),
        Arc::new(TimedAnimator::new()),
    );
    session.submit_order(ORDER).await;
    let watched = session.current_dish().unwrap().id.clone();

    // Another diner rates through the same pipeline.
    pipeline
        .submit_rating(&watched, Outcome::Dislike, None)
        .await
        .unwrap();
    pipeline
        .submit_rating(&watched, Outcome::Like, None)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(
        session.current_counts(),
        RatingCounts { likes: 1, dislikes: 1 }
    );
}

#[tokio::test]
async fn button_taps_skip_the_exit_animation() {
    let (_tmp, pipeline) = temp_pipeline().await;
    seeded_order(&pipeline).await;
    let animator = Arc::new(TimedAnimator::new());
    let mut session = DinerSession::new(
        pipeline.clone(),
        GestureConfig::default(),
        animator.clone(),
    );
    session.submit_order(ORDER).await;
    let current = session.current_dish().unwrap().id.clone();

    let started = std::time::Instant::now();
    assert!(session.tap(CardButton::Heart).await);

    assert!(started.elapsed() < Duration::from_millis(300));
    let ratings = pipeline.list_ratings(&current).await.unwrap();
    assert_eq!(ratings[0].outcome, Outcome::Like);
}

#[tokio::test]
async fn reset_drops_the_live_subscription() {
    let (_tmp, pipeline) = temp_pipeline().await;
    seeded_order(&pipeline).await;
    let mut session = DinerSession::new(
        pipeline.clone(),
        quick_gestures(),
        Arc::new(TimedAnimator::new()),
    );
    session.submit_order(ORDER).await;
    assert_eq!(pipeline.feed().active_subscriptions(), 1);

    session.reset();

    assert_eq!(pipeline.feed().active_subscriptions(), 0);
    assert!(session.current_dish().is_none());
    assert!(!session.tap(CardButton::Dismiss).await);
}
