use crate::error::StoreError;
use crate::ratings::types::{
    Dish, DishOrder, NewDish, NewRating, Order, Outcome, Rating, RatingCounts,
};
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const DISH_COLUMNS: &str = "id, name, restaurant, price, image_url, tags, created_at";

#[derive(sqlx::FromRow)]
struct DishRow {
    id: String,
    name: String,
    restaurant: String,
    price: String,
    image_url: String,
    tags: String,
    created_at: String,
}

impl DishRow {
    fn into_dish(self) -> Result<Dish, StoreError> {
        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .map_err(|e| StoreError::Decode(format!("dish {} tags: {e}", self.id)))?;
        Ok(Dish {
            id: self.id,
            name: self.name,
            restaurant: self.restaurant,
            price: self.price,
            image_url: self.image_url,
            tags,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: String,
    dish_id: String,
    rating: String,
    comment: Option<String>,
    created_at: String,
}

impl RatingRow {
    fn into_rating(self) -> Result<Rating, StoreError> {
        let outcome: Outcome = self.rating.parse().map_err(|_| {
            StoreError::Decode(format!("rating {} has outcome {:?}", self.id, self.rating))
        })?;
        Ok(Rating {
            id: self.id,
            dish_id: self.dish_id,
            outcome,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

// Fixed-width UTC timestamps sort lexicographically in creation order.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn decode_dishes(rows: Vec<DishRow>) -> Result<Vec<Dish>, StoreError> {
    rows.into_iter().map(DishRow::into_dish).collect()
}

fn normalize_order_number(order_number: &str) -> Result<&str, StoreError> {
    let trimmed = order_number.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput("order number is empty".into()));
    }
    Ok(trimmed)
}

// ── Public repository operations ─────────────────────────────

pub(super) async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}

pub(super) async fn insert_dish(pool: &SqlitePool, dish: NewDish) -> Result<Dish, StoreError> {
    let name = dish.name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidInput("dish name is empty".into()));
    }
    let tags = dish.normalized_tags();
    let encoded_tags =
        serde_json::to_string(&tags).map_err(|e| StoreError::Decode(e.to_string()))?;

    let stored = Dish {
        id: new_id(),
        name: name.to_string(),
        restaurant: dish.restaurant.trim().to_string(),
        price: dish.price.trim().to_string(),
        image_url: dish.image_url.trim().to_string(),
        tags,
        created_at: timestamp(),
    };

    sqlx::query(
        "INSERT INTO dishes (id, name, restaurant, price, image_url, tags, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&stored.id)
    .bind(&stored.name)
    .bind(&stored.restaurant)
    .bind(&stored.price)
    .bind(&stored.image_url)
    .bind(&encoded_tags)
    .bind(&stored.created_at)
    .execute(pool)
    .await?;

    tracing::info!(dish_id = %stored.id, name = %stored.name, "dish.inserted");
    Ok(stored)
}

pub(super) async fn fetch_dishes(pool: &SqlitePool) -> Result<Vec<Dish>, StoreError> {
    let rows: Vec<DishRow> = sqlx::query_as(&format!(
        "SELECT {DISH_COLUMNS} FROM dishes ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;
    decode_dishes(rows)
}

async fn dish_exists(pool: &SqlitePool, dish_id: &str) -> Result<bool, StoreError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM dishes WHERE id = ?1")
        .bind(dish_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Look up an order by number, inserting it first when unseen.
async fn ensure_order(pool: &SqlitePool, order_number: &str) -> Result<Order, StoreError> {
    let inserted = sqlx::query(
        "INSERT INTO orders (id, order_number, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(order_number) DO NOTHING",
    )
    .bind(new_id())
    .bind(order_number)
    .bind(timestamp())
    .execute(pool)
    .await?;

    if inserted.rows_affected() > 0 {
        tracing::info!(order_number, "order.created");
    }

    let (id, order_number, created_at): (String, String, String) = sqlx::query_as(
        "SELECT id, order_number, created_at FROM orders WHERE order_number = ?1",
    )
    .bind(order_number)
    .fetch_one(pool)
    .await?;

    Ok(Order {
        id,
        order_number,
        created_at,
    })
}

pub(super) async fn fetch_dishes_by_order_number(
    pool: &SqlitePool,
    order_number: &str,
) -> Result<Vec<Dish>, StoreError> {
    let order_number = normalize_order_number(order_number)?;
    let order = ensure_order(pool, order_number).await?;

    let rows: Vec<DishRow> = sqlx::query_as(
        "SELECT d.id, d.name, d.restaurant, d.price, d.image_url, d.tags, d.created_at
         FROM dishes d
         JOIN dish_orders o ON o.dish_id = d.id
         WHERE o.order_id = ?1
         ORDER BY d.created_at DESC, d.rowid DESC",
    )
    .bind(&order.id)
    .fetch_all(pool)
    .await?;
    decode_dishes(rows)
}

pub(super) async fn associate_dish_with_order(
    pool: &SqlitePool,
    dish_id: &str,
    order_number: &str,
) -> Result<DishOrder, StoreError> {
    let order_number = normalize_order_number(order_number)?;
    if !dish_exists(pool, dish_id).await? {
        return Err(StoreError::UnknownDish(dish_id.to_string()));
    }
    let order = ensure_order(pool, order_number).await?;

    sqlx::query(
        "INSERT INTO dish_orders (id, dish_id, order_id, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(dish_id, order_id) DO NOTHING",
    )
    .bind(new_id())
    .bind(dish_id)
    .bind(&order.id)
    .bind(timestamp())
    .execute(pool)
    .await?;

    let (id, dish_id, order_id, created_at): (String, String, String, String) = sqlx::query_as(
        "SELECT id, dish_id, order_id, created_at FROM dish_orders
         WHERE dish_id = ?1 AND order_id = ?2",
    )
    .bind(dish_id)
    .bind(&order.id)
    .fetch_one(pool)
    .await?;

    tracing::debug!(%dish_id, order_number, "dish.associated");
    Ok(DishOrder {
        id,
        dish_id,
        order_id,
        created_at,
    })
}

pub(super) async fn submit_rating(
    pool: &SqlitePool,
    input: NewRating,
) -> Result<Rating, StoreError> {
    if !dish_exists(pool, &input.dish_id).await? {
        return Err(StoreError::UnknownDish(input.dish_id));
    }

    let rating = Rating {
        id: new_id(),
        comment: input.normalized_comment(),
        dish_id: input.dish_id,
        outcome: input.outcome,
        created_at: timestamp(),
    };

    sqlx::query(
        "INSERT INTO ratings (id, dish_id, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&rating.id)
    .bind(&rating.dish_id)
    .bind(rating.outcome.as_ref())
    .bind(rating.comment.as_deref())
    .bind(&rating.created_at)
    .execute(pool)
    .await?;

    Ok(rating)
}

pub(super) async fn list_ratings(
    pool: &SqlitePool,
    dish_id: &str,
) -> Result<Vec<Rating>, StoreError> {
    let rows: Vec<RatingRow> = sqlx::query_as(
        "SELECT id, dish_id, rating, comment, created_at FROM ratings
         WHERE dish_id = ?1
         ORDER BY created_at ASC, rowid ASC",
    )
    .bind(dish_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(RatingRow::into_rating).collect()
}

pub(super) async fn ratings_count(
    pool: &SqlitePool,
    dish_id: &str,
) -> Result<RatingCounts, StoreError> {
    let grouped: Vec<(String, i64)> = sqlx::query_as(
        "SELECT rating, COUNT(*) FROM ratings WHERE dish_id = ?1 GROUP BY rating",
    )
    .bind(dish_id)
    .fetch_all(pool)
    .await?;

    let mut counts = RatingCounts::default();
    for (outcome, count) in grouped {
        let count = u64::try_from(count).unwrap_or(0);
        match outcome.parse::<Outcome>() {
            Ok(Outcome::Like) => counts.likes = count,
            Ok(Outcome::Dislike) => counts.dislikes = count,
            Err(_) => tracing::warn!(%dish_id, %outcome, "ratings.unknown_outcome"),
        }
    }
    Ok(counts)
}
