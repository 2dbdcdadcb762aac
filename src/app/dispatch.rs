use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::Config;
use crate::app::status::render_status;
use crate::ratings::{Dish, RatingPipeline, create_pipeline, seed_sample_dishes};

fn print_dishes(dishes: &[Dish]) {
    if dishes.is_empty() {
        println!("No dishes.");
        return;
    }
    for dish in dishes {
        println!(
            "{}  {} @ {}  {}  [{}]",
            dish.id,
            dish.name,
            dish.restaurant,
            dish.price,
            dish.tags.join(", ")
        );
    }
}

async fn seed(pipeline: &RatingPipeline, order: Option<&str>) -> Result<()> {
    let dishes = seed_sample_dishes(&**pipeline.store())
        .await
        .context("seed sample dishes")?;

    if let Some(order) = order {
        for dish in &dishes {
            pipeline
                .associate_dish_with_order(&dish.id, order)
                .await
                .with_context(|| format!("associate {} with order {order}", dish.id))?;
        }
        println!("Seeded {} dishes for order {}.", dishes.len(), order.trim());
    } else {
        println!("Seeded {} dishes.", dishes.len());
    }
    print_dishes(&dishes);
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let config = Arc::new(config);
    let pipeline = create_pipeline(&config)
        .await
        .context("open rating store")?;

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting DishSwipe gateway on {host} (random port)");
            } else {
                info!("Starting DishSwipe gateway on {host}:{port}");
            }
            crate::transport::gateway::run_gateway(&host, port, Arc::clone(&config), pipeline)
                .await
        }

        Commands::Dishes { order } => {
            let dishes = match order {
                Some(order) => pipeline.fetch_dishes_by_order_number(&order).await?,
                None => pipeline.fetch_dishes().await?,
            };
            print_dishes(&dishes);
            Ok(())
        }

        Commands::Seed { order } => seed(&pipeline, order.as_deref()).await,

        Commands::Rate {
            dish_id,
            rating,
            comment,
        } => {
            let rating = pipeline
                .submit_rating(&dish_id, rating, comment)
                .await
                .with_context(|| format!("rate dish {dish_id}"))?;
            println!("Rated {} {} ({})", rating.dish_id, rating.outcome, rating.id);
            Ok(())
        }

        Commands::Counts { dish_id } => {
            let counts = pipeline.get_ratings_count(&dish_id).await?;
            println!("likes: {}  dislikes: {}", counts.likes, counts.dislikes);
            Ok(())
        }

        Commands::Status => {
            let store = pipeline.store();
            let healthy = store.health_check().await;
            println!("{}", render_status(&config, store.name(), healthy));
            Ok(())
        }
    }
}
