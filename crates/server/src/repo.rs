//! Repository executing composed catalog queries.
//!
//! Page, count, and price-range statements all derive from one
//! [`compose`] result, so the reported range always bounds the page's
//! contents.

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};
use vitrine_catalog::prelude::*;

/// Row shape for product selection, matching the composed column list.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
    price: i64,
    promo: bool,
}

impl ProductRow {
    fn into_product(self, category_ids: Vec<CategoryId>) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            slug: self.slug,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            promo: self.promo,
            category_ids,
        }
    }
}

/// Read operations over the product catalog.
pub struct ProductRepo;

impl ProductRepo {
    /// Fetch one result page: the page's products, total match count,
    /// and the price range over the whole filtered set.
    pub async fn find_page(
        pool: &SqlitePool,
        criteria: &SearchCriteria,
    ) -> Result<ResultPage, sqlx::Error> {
        let composed = compose(criteria);

        let (page_sql, page_args) = composed.build_page_sql(criteria.page);
        let rows: Vec<ProductRow> = bind_args(sqlx::query_as(&page_sql), &page_args)
            .fetch_all(pool)
            .await?;

        let (count_sql, count_args) = composed.build_count_sql();
        let total: i64 = bind_args(sqlx::query_scalar(&count_sql), &count_args)
            .fetch_one(pool)
            .await?;

        let price_range = Self::find_price_range(pool, criteria).await?;

        let mut categories = Self::categories_for(pool, &rows).await?;
        let items = rows
            .into_iter()
            .map(|row| {
                let ids = categories.remove(&row.id).unwrap_or_default();
                row.into_product(ids)
            })
            .collect();

        Ok(ResultPage::new(
            items,
            Pagination::new(criteria.page, total),
            price_range,
        ))
    }

    /// Aggregate MIN/MAX price over the unpaginated filtered set.
    ///
    /// An empty filtered set yields the degenerate `(0, 0)` range.
    pub async fn find_price_range(
        pool: &SqlitePool,
        criteria: &SearchCriteria,
    ) -> Result<PriceRange, sqlx::Error> {
        let composed = compose(criteria);
        let (sql, args) = composed.build_range_sql();

        let row: SqliteRow = bind_args(sqlx::query(&sql), &args).fetch_one(pool).await?;
        let min: Option<i64> = row.try_get("min_price")?;
        let max: Option<i64> = row.try_get("max_price")?;

        Ok(PriceRange::new(min.unwrap_or(0), max.unwrap_or(0)))
    }

    /// All categories, for the filter form's checkboxes.
    pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Category {
                id: CategoryId::new(id),
                name,
            })
            .collect())
    }

    /// Category memberships for the page's products, keyed by product id.
    async fn categories_for(
        pool: &SqlitePool,
        rows: &[ProductRow],
    ) -> Result<HashMap<i64, Vec<CategoryId>>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = rows.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let sql = format!(
            "SELECT product_id, category_id FROM product_categories \
             WHERE product_id IN ({}) ORDER BY category_id",
            placeholders
        );

        let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
        for row in rows {
            query = query.bind(row.id);
        }

        let mut map: HashMap<i64, Vec<CategoryId>> = HashMap::new();
        for (product_id, category_id) in query.fetch_all(pool).await? {
            map.entry(product_id)
                .or_default()
                .push(CategoryId::new(category_id));
        }
        Ok(map)
    }
}

/// Bind composed arguments onto a sqlx query in order.
fn bind_args<'q, Q>(query: Q, args: &'q [SqlArg]) -> Q
where
    Q: SqlBind<'q>,
{
    let mut query = query;
    for arg in args {
        query = match arg {
            SqlArg::Int(value) => query.bind_int(*value),
            SqlArg::Text(value) => query.bind_text(value.as_str()),
        };
    }
    query
}

/// Minimal binding seam so [`bind_args`] works across `query`,
/// `query_as` and `query_scalar`.
trait SqlBind<'q>: Sized {
    fn bind_int(self, value: i64) -> Self;
    fn bind_text(self, value: &'q str) -> Self;
}

impl<'q> SqlBind<'q> for sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    fn bind_int(self, value: i64) -> Self {
        self.bind(value)
    }
    fn bind_text(self, value: &'q str) -> Self {
        self.bind(value)
    }
}

impl<'q, O> SqlBind<'q>
    for sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>
{
    fn bind_int(self, value: i64) -> Self {
        self.bind(value)
    }
    fn bind_text(self, value: &'q str) -> Self {
        self.bind(value)
    }
}

impl<'q, O> SqlBind<'q>
    for sqlx::query::QueryScalar<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>
{
    fn bind_int(self, value: i64) -> Self {
        self.bind(value)
    }
    fn bind_text(self, value: &'q str) -> Self {
        self.bind(value)
    }
}
