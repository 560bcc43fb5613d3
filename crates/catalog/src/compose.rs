//! Query composition: criteria to SQL predicates and orderings.
//!
//! [`compose`] is a pure function from [`SearchCriteria`] to a
//! [`ComposedQuery`]. The repository derives its page, count, and
//! price-range statements from the same composition so the reported
//! range always bounds the page's contents.

use crate::criteria::{SearchCriteria, PAGE_SIZE};
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Column list for product selection. Predicates and orderings
/// reference the `p` alias.
const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.slug, p.description, p.image_url, p.price, p.promo";

/// A bind parameter for a composed statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlArg {
    Int(i64),
    Text(String),
}

/// A single filter predicate over the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Case-insensitive substring match on the product name.
    NameContains(String),
    /// Price greater than or equal to the bound.
    PriceAtLeast(i64),
    /// Price less than or equal to the bound.
    PriceAtMost(i64),
    /// Promoted products only.
    PromoOnly,
    /// Membership in any of the listed categories (OR, not AND).
    InAnyCategory(Vec<CategoryId>),
}

impl Predicate {
    /// Build the SQL WHERE component and its bind parameters.
    pub fn to_sql(&self) -> (String, Vec<SqlArg>) {
        match self {
            Predicate::NameContains(text) => (
                "p.name LIKE ?".to_string(),
                vec![SqlArg::Text(format!("%{}%", text))],
            ),
            Predicate::PriceAtLeast(min) => {
                ("p.price >= ?".to_string(), vec![SqlArg::Int(*min)])
            }
            Predicate::PriceAtMost(max) => {
                ("p.price <= ?".to_string(), vec![SqlArg::Int(*max)])
            }
            Predicate::PromoOnly => ("p.promo = 1".to_string(), vec![]),
            Predicate::InAnyCategory(ids) => {
                let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
                let args = ids.iter().map(|id| SqlArg::Int(id.as_i64())).collect();
                (
                    format!(
                        "p.id IN (SELECT product_id FROM product_categories WHERE category_id IN ({}))",
                        placeholders
                    ),
                    args,
                )
            }
        }
    }
}

/// An ordering induced by a filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    NameAsc,
    PriceAsc,
    PromoAsc,
}

impl Ordering {
    /// SQL ORDER BY term.
    pub fn to_sql(&self) -> &'static str {
        match self {
            Ordering::NameAsc => "p.name ASC",
            Ordering::PriceAsc => "p.price ASC",
            Ordering::PromoAsc => "p.promo ASC",
        }
    }
}

/// The result of composing criteria: conjunctive predicates plus the
/// accumulated orderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedQuery {
    pub predicates: Vec<Predicate>,
    pub orderings: Vec<Ordering>,
}

/// Compose criteria into predicates and orderings.
///
/// Each rule applies independently when its field is present; the
/// predicates combine with AND. Both price bounds induce `price ASC`;
/// the duplicate collapses to one (stated twice in the original,
/// harmless redundancy). With nothing set, the result is the
/// unrestricted catalog in natural order.
pub fn compose(criteria: &SearchCriteria) -> ComposedQuery {
    let mut predicates = Vec::new();
    let mut orderings = Vec::new();

    if let Some(text) = &criteria.text {
        if !text.is_empty() {
            predicates.push(Predicate::NameContains(text.clone()));
            push_ordering(&mut orderings, Ordering::NameAsc);
        }
    }
    if let Some(min) = criteria.min_price {
        if min > 0 {
            predicates.push(Predicate::PriceAtLeast(min));
            push_ordering(&mut orderings, Ordering::PriceAsc);
        }
    }
    if let Some(max) = criteria.max_price {
        if max > 0 {
            predicates.push(Predicate::PriceAtMost(max));
            push_ordering(&mut orderings, Ordering::PriceAsc);
        }
    }
    if criteria.promo_only {
        predicates.push(Predicate::PromoOnly);
        push_ordering(&mut orderings, Ordering::PromoAsc);
    }
    if !criteria.category_ids.is_empty() {
        predicates.push(Predicate::InAnyCategory(criteria.category_ids.clone()));
    }

    ComposedQuery {
        predicates,
        orderings,
    }
}

fn push_ordering(orderings: &mut Vec<Ordering>, ordering: Ordering) {
    if !orderings.contains(&ordering) {
        orderings.push(ordering);
    }
}

impl ComposedQuery {
    /// Build the SQL WHERE clause and its bind parameters.
    pub fn where_clause(&self) -> (String, Vec<SqlArg>) {
        if self.predicates.is_empty() {
            return ("1=1".to_string(), vec![]);
        }

        let mut clauses = Vec::new();
        let mut args = Vec::new();
        for predicate in &self.predicates {
            let (clause, predicate_args) = predicate.to_sql();
            clauses.push(format!("({})", clause));
            args.extend(predicate_args);
        }

        (clauses.join(" AND "), args)
    }

    /// Build the ORDER BY clause, or `None` for natural order.
    pub fn order_clause(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        Some(
            self.orderings
                .iter()
                .map(|o| o.to_sql())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Build the paginated SELECT for one result page.
    pub fn build_page_sql(&self, page: i64) -> (String, Vec<SqlArg>) {
        let (where_clause, args) = self.where_clause();
        let order = self
            .order_clause()
            .map(|o| format!(" ORDER BY {}", o))
            .unwrap_or_default();
        let offset = (page.max(1) - 1) * PAGE_SIZE;

        let sql = format!(
            "SELECT {} FROM products p WHERE {}{} LIMIT {} OFFSET {}",
            PRODUCT_COLUMNS, where_clause, order, PAGE_SIZE, offset
        );
        (sql, args)
    }

    /// Build the COUNT statement over the unpaginated filtered set.
    pub fn build_count_sql(&self) -> (String, Vec<SqlArg>) {
        let (where_clause, args) = self.where_clause();
        let sql = format!(
            "SELECT COUNT(*) AS total FROM products p WHERE {}",
            where_clause
        );
        (sql, args)
    }

    /// Build the MIN/MAX price aggregation over the unpaginated
    /// filtered set.
    pub fn build_range_sql(&self) -> (String, Vec<SqlArg>) {
        let (where_clause, args) = self.where_clause();
        let sql = format!(
            "SELECT MIN(p.price) AS min_price, MAX(p.price) AS max_price FROM products p WHERE {}",
            where_clause
        );
        (sql, args)
    }
}
