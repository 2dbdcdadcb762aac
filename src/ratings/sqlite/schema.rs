use anyhow::Context;
use sqlx::SqlitePool;

pub(super) async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS dishes (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            restaurant  TEXT NOT NULL,
            price       TEXT NOT NULL,
            image_url   TEXT NOT NULL,
            tags        TEXT NOT NULL DEFAULT '[]',
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_dishes_created ON dishes(created_at DESC);

        CREATE TABLE IF NOT EXISTS ratings (
            id          TEXT PRIMARY KEY,
            dish_id     TEXT NOT NULL REFERENCES dishes(id),
            rating      TEXT NOT NULL CHECK (rating IN ('like', 'dislike')),
            comment     TEXT,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_ratings_dish ON ratings(dish_id);

        CREATE TABLE IF NOT EXISTS orders (
            id            TEXT PRIMARY KEY,
            order_number  TEXT NOT NULL UNIQUE,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dish_orders (
            id          TEXT PRIMARY KEY,
            dish_id     TEXT NOT NULL REFERENCES dishes(id),
            order_id    TEXT NOT NULL REFERENCES orders(id),
            created_at  TEXT NOT NULL,
            UNIQUE(dish_id, order_id)
        );
        CREATE INDEX IF NOT EXISTS idx_dish_orders_order ON dish_orders(order_id);",
    )
    .execute(pool)
    .await
    .context("initialize rating schema")?;

    Ok(())
}
