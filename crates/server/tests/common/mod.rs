//! Shared fixtures for integration tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps the in-memory database alive and
/// shared for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");

    vitrine_server::MIGRATOR
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

pub async fn insert_category(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .expect("insert category");
}

pub async fn insert_product(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    price: i64,
    promo: bool,
    category_ids: &[i64],
) {
    sqlx::query(
        "INSERT INTO products (id, name, slug, description, image_url, price, promo) \
         VALUES (?, ?, ?, NULL, NULL, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(format!("product-{id}"))
    .bind(price)
    .bind(promo)
    .execute(pool)
    .await
    .expect("insert product");

    for category_id in category_ids {
        sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
            .bind(id)
            .bind(category_id)
            .execute(pool)
            .await
            .expect("insert product category");
    }
}
