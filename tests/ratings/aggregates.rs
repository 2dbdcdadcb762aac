use dishswipe::ratings::{Outcome, RatingCounts};

use crate::store_harness::{seeded_order, temp_pipeline};

#[tokio::test]
async fn counts_always_sum_to_the_number_of_ratings() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let dish_id = &dishes[0].id;

    for step in 0..17_u32 {
        let outcome = if step % 3 == 0 {
            Outcome::Dislike
        } else {
            Outcome::Like
        };
        pipeline.submit_rating(dish_id, outcome, None).await.unwrap();

        let counts = pipeline.get_ratings_count(dish_id).await.unwrap();
        let listed = pipeline.list_ratings(dish_id).await.unwrap();
        assert_eq!(counts.total(), listed.len() as u64);
        assert_eq!(counts, RatingCounts::from_ratings(&listed));
    }

    let counts = pipeline.get_ratings_count(dish_id).await.unwrap();
    assert_eq!(counts, RatingCounts { likes: 11, dislikes: 6 });
}

#[tokio::test]
async fn counts_are_scoped_to_one_dish() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;

    pipeline
        .submit_rating(&dishes[0].id, Outcome::Like, None)
        .await
        .unwrap();
    pipeline
        .submit_rating(&dishes[1].id, Outcome::Dislike, Some("cold".into()))
        .await
        .unwrap();

    let first = pipeline.get_ratings_count(&dishes[0].id).await.unwrap();
    let second = pipeline.get_ratings_count(&dishes[1].id).await.unwrap();
    assert_eq!(first, RatingCounts { likes: 1, dislikes: 0 });
    assert_eq!(second, RatingCounts { likes: 0, dislikes: 1 });
}

#[tokio::test]
async fn unrated_dish_has_zero_counts() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;

    let counts = pipeline.get_ratings_count(&dishes[1].id).await.unwrap();

    assert_eq!(counts, RatingCounts::default());
}
