//! Demo catalog seeding.

use sqlx::SqlitePool;

/// Seed a small demo catalog when the products table is empty.
///
/// Lets the server come up with something to browse locally; a
/// production deployment points `DATABASE_URL` at a populated file.
pub async fn seed_demo(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("seeding demo catalog");

    let categories = [(1, "Luminaires"), (2, "Mobilier"), (3, "Tapis"), (4, "Déco")];
    for (id, name) in categories {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    // (name, price in euros, promo, category ids)
    let products: &[(&str, i64, bool, &[i64])] = &[
        ("Lampe de bureau", 35, false, &[1]),
        ("Suspension rotin", 89, true, &[1, 4]),
        ("Lampadaire arqué", 129, false, &[1]),
        ("Fauteuil scandinave", 149, false, &[2]),
        ("Table basse chêne", 199, true, &[2]),
        ("Étagère murale", 49, false, &[2, 4]),
        ("Tapis berbère", 99, false, &[3]),
        ("Tapis jute rond", 55, true, &[3]),
        ("Miroir soleil", 69, false, &[4]),
        ("Vase céramique", 25, false, &[4]),
        ("Banc d'entrée", 119, false, &[2]),
        ("Guirlande lumineuse", 19, true, &[1, 4]),
    ];

    for (index, (name, price, promo, category_ids)) in products.iter().enumerate() {
        let id = index as i64 + 1;
        let slug = name
            .to_lowercase()
            .replace(|c: char| !c.is_alphanumeric(), "-");
        sqlx::query(
            "INSERT INTO products (id, name, slug, description, image_url, price, promo) \
             VALUES (?, ?, ?, NULL, NULL, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(price)
        .bind(promo)
        .execute(pool)
        .await?;

        for category_id in *category_ids {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(id)
                .bind(category_id)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
