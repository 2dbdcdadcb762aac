mod repository;
mod schema;

use crate::ratings::traits::{RatingStore, StoreFuture};
use crate::ratings::types::{Dish, DishOrder, NewDish, NewRating, Rating, RatingCounts};
use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

/// SQLite-backed store for dishes, orders and ratings.
///
/// Tags are kept as a JSON array in a TEXT column; timestamps are fixed-width
/// RFC 3339 UTC strings so `ORDER BY created_at` matches insertion order.
pub struct SqliteRatingStore {
    pool: SqlitePool,
}

impl SqliteRatingStore {
    /// Open (or create) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create database directory")?;
        }

        let url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePool::connect(&url)
            .await
            .context("open SQLite database")?;

        schema::init_schema(&pool).await?;
        tracing::info!(path = %db_path.display(), "store.opened");

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Pinned to a single connection: every `sqlite::memory:` connection is a
    /// separate database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("open in-memory SQLite")?;
        schema::init_schema(&pool).await?;
        Ok(Self { pool })
    }
}

impl RatingStore for SqliteRatingStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn health_check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move { repository::health_check(&self.pool).await })
    }

    fn insert_dish(&self, dish: NewDish) -> StoreFuture<'_, Dish> {
        Box::pin(async move { repository::insert_dish(&self.pool, dish).await })
    }

    fn fetch_dishes(&self) -> StoreFuture<'_, Vec<Dish>> {
        Box::pin(async move { repository::fetch_dishes(&self.pool).await })
    }

    fn fetch_dishes_by_order_number<'a>(
        &'a self,
        order_number: &'a str,
    ) -> StoreFuture<'a, Vec<Dish>> {
        Box::pin(async move {
            repository::fetch_dishes_by_order_number(&self.pool, order_number).await
        })
    }

    fn associate_dish_with_order<'a>(
        &'a self,
        dish_id: &'a str,
        order_number: &'a str,
    ) -> StoreFuture<'a, DishOrder> {
        Box::pin(async move {
            repository::associate_dish_with_order(&self.pool, dish_id, order_number).await
        })
    }

    fn submit_rating(&self, rating: NewRating) -> StoreFuture<'_, Rating> {
        Box::pin(async move { repository::submit_rating(&self.pool, rating).await })
    }

    fn list_ratings<'a>(&'a self, dish_id: &'a str) -> StoreFuture<'a, Vec<Rating>> {
        Box::pin(async move { repository::list_ratings(&self.pool, dish_id).await })
    }

    fn ratings_count<'a>(&'a self, dish_id: &'a str) -> StoreFuture<'a, RatingCounts> {
        Box::pin(async move { repository::ratings_count(&self.pool, dish_id).await })
    }
}
